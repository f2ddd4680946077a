//! Configuration types for stamp.
//!
//! A deployment describes both sides of the token exchange in a single YAML
//! file: the `signer` block drives claim issuing and the `verifier` block
//! holds the policy incoming claims are checked against.
//!
//! ```yaml
//! signer:
//!   issuer: auth.example.com
//!   audience: api.example.com
//!   lifetime_secs: 3600
//! verifier:
//!   issuer: auth.example.com
//!   audience: api.example.com
//!   clock_skew_tolerance_secs: 60
//!   max_lifetime_secs: 86400
//! ```

pub mod signer;
pub mod verifier;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use signer::SignerConfig;
pub use verifier::VerifierConfig;

/// Complete stamp configuration loaded from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampConfig {
    /// Issuing side.
    pub signer: SignerConfig,

    /// Verifying side.
    pub verifier: VerifierConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Severity of a configuration finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// May indicate a potential issue.
    Warning,
    /// Configuration cannot work as written.
    Error,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "WARN"),
            IssueSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single consistency finding produced by [`StampConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: IssueSeverity,
    /// Dotted path of the offending field (e.g. "signer.lifetime_secs").
    pub location: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            location: location.into(),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)
    }
}

impl StampConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration and reject it if [`validate`](Self::validate)
    /// reports any error.
    pub fn load_checked(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_file(path)?;
        let errors: Vec<String> = config
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .map(|issue| issue.to_string())
            .collect();

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Config(errors.join("; ")))
        }
    }

    /// Check the signer and verifier blocks for consistency.
    ///
    /// Claims issued under `signer` must be accepted under `verifier`, so the
    /// identities have to agree and the issued lifetime has to fit the policy.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (location, value) in [
            ("signer.issuer", &self.signer.issuer),
            ("signer.audience", &self.signer.audience),
            ("verifier.issuer", &self.verifier.issuer),
            ("verifier.audience", &self.verifier.audience),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(location, "must not be empty"));
            }
        }

        if self.signer.issuer != self.verifier.issuer {
            issues.push(ConfigIssue::error(
                "signer.issuer",
                format!(
                    "'{}' does not match verifier.issuer '{}'",
                    self.signer.issuer, self.verifier.issuer
                ),
            ));
        }

        if self.signer.audience != self.verifier.audience {
            issues.push(ConfigIssue::error(
                "signer.audience",
                format!(
                    "'{}' does not match verifier.audience '{}'",
                    self.signer.audience, self.verifier.audience
                ),
            ));
        }

        if self.signer.lifetime_secs > self.verifier.max_lifetime_secs {
            issues.push(ConfigIssue::error(
                "signer.lifetime_secs",
                format!(
                    "{}s exceeds verifier.max_lifetime_secs ({}s)",
                    self.signer.lifetime_secs, self.verifier.max_lifetime_secs
                ),
            ));
        }

        if self.verifier.clock_skew_tolerance_secs > self.verifier.max_lifetime_secs {
            issues.push(ConfigIssue::warning(
                "verifier.clock_skew_tolerance_secs",
                format!(
                    "{}s is larger than verifier.max_lifetime_secs ({}s)",
                    self.verifier.clock_skew_tolerance_secs, self.verifier.max_lifetime_secs
                ),
            ));
        }

        issues
    }
}
