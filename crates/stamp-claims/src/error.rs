//! Error types for claims validation.

use thiserror::Error;

/// Reasons an encoded claims payload is rejected.
///
/// Each variant carries only what a caller needs to explain the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    /// Payload is not URL-safe base64. Carries the raw input.
    #[error("claims payload is not valid base64: {0:?}")]
    InvalidBase64Format(String),

    /// Decoded payload is not a JSON claims object. Carries the decoded text.
    #[error("failed to parse claims: {0:?}")]
    FailedToParseClaims(String),

    #[error("no `sub` claim provided")]
    NoSubClaimProvided,

    #[error("no `aud` claim provided")]
    NoAudClaimProvided,

    #[error("no `iss` claim provided")]
    NoIssClaimProvided,

    #[error("no `exp` claim provided")]
    NoExpClaimProvided,

    #[error("no `iat` claim provided")]
    NoIatClaimProvided,

    /// `aud` does not match the configured audience.
    #[error("invalid `aud` claim: {0:?}")]
    InvalidAudClaim(String),

    /// `iss` does not match the configured issuer.
    #[error("invalid `iss` claim: {0:?}")]
    InvalidIssClaim(String),

    /// `exp` lies further in the past than the clock-skew tolerance allows.
    #[error("`exp` claim {exp} is expired (now {now})")]
    ExpiredExpClaim { exp: i64, now: i64 },

    /// `iat` lies further in the future than the clock-skew tolerance allows.
    #[error("`iat` claim {iat} is in the future (now {now})")]
    FutureIatClaim { iat: i64, now: i64 },

    /// `iat` is after `exp`, or `exp - iat` exceeds the maximum lifetime.
    #[error("invalid token lifetime")]
    InvalidLifeTime,
}
