// Configuration types shared across all stamp crates
pub mod config;

// Re-export commonly used config types for convenience
pub use config::{
    ConfigError, ConfigIssue, IssueSeverity, SignerConfig, StampConfig, VerifierConfig,
};
