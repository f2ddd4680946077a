//! Verifier-side claims policy.

use serde::{Deserialize, Serialize};

/// Policy applied by the validator to incoming claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Expected `iss` claim.
    pub issuer: String,

    /// Expected `aud` claim.
    pub audience: String,

    /// Allowed drift, in seconds, between issuer and verifier clocks.
    /// Applied to both `exp` and `iat`, inclusive at the boundary.
    #[serde(default = "default_clock_skew_tolerance_secs")]
    pub clock_skew_tolerance_secs: u64,

    /// Upper bound on `exp - iat`.
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

impl VerifierConfig {
    /// Create a verifier policy with default tolerance and maximum lifetime.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            clock_skew_tolerance_secs: default_clock_skew_tolerance_secs(),
            max_lifetime_secs: default_max_lifetime_secs(),
        }
    }

    pub fn with_clock_skew_tolerance_secs(mut self, secs: u64) -> Self {
        self.clock_skew_tolerance_secs = secs;
        self
    }

    pub fn with_max_lifetime_secs(mut self, secs: u64) -> Self {
        self.max_lifetime_secs = secs;
        self
    }
}

fn default_clock_skew_tolerance_secs() -> u64 {
    60
}

fn default_max_lifetime_secs() -> u64 {
    86_400
}
