//! Signer-side claims configuration.

use serde::{Deserialize, Serialize};

/// Configuration read by the encoder when issuing claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Value written to the `iss` claim.
    pub issuer: String,

    /// Value written to the `aud` claim.
    pub audience: String,

    /// Seconds between `iat` and `exp` for newly issued claims.
    #[serde(default = "default_lifetime_secs")]
    pub lifetime_secs: u64,
}

impl SignerConfig {
    /// Create a signer configuration with the default lifetime.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            lifetime_secs: default_lifetime_secs(),
        }
    }

    /// Override the token lifetime.
    pub fn with_lifetime_secs(mut self, lifetime_secs: u64) -> Self {
        self.lifetime_secs = lifetime_secs;
        self
    }
}

fn default_lifetime_secs() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_defaults_when_omitted() {
        let config: SignerConfig =
            serde_yaml::from_str("issuer: auth.example\naudience: api.example\n").unwrap();
        assert_eq!(config.lifetime_secs, 3600);
        assert_eq!(config, SignerConfig::new("auth.example", "api.example"));
    }
}
