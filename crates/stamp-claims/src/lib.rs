//! # stamp-claims
//!
//! Issuing and verifying the claims payload of a signed token (the middle
//! segment of a JWT-style credential).
//!
//! This crate provides functionality for:
//! - Building a canonical claims document for a subject and its roles
//! - Encoding it as unpadded URL-safe base64 over JSON
//! - Decoding an incoming payload and validating it against identity and
//!   time-based policy
//!
//! Signing and signature verification happen outside this crate; the
//! validator assumes it is handed a payload whose signature already checked
//! out.
//!
//! ## Validation order
//!
//! | Step | Check | Error |
//! |------|-------|-------|
//! | 1 | base64 decode | `InvalidBase64Format` |
//! | 2 | JSON parse | `FailedToParseClaims` |
//! | 3 | `sub`, `aud`, `iss`, `exp`, `iat` present | `No*ClaimProvided` |
//! | 4 | `aud` matches | `InvalidAudClaim` |
//! | 5 | `iss` matches | `InvalidIssClaim` |
//! | 6 | `exp >= now - tolerance` | `ExpiredExpClaim` |
//! | 7 | `iat <= now + tolerance` | `FutureIatClaim` |
//! | 8 | `iat <= exp`, `exp - iat <= max lifetime` | `InvalidLifeTime` |
//!
//! The first failing step wins.

pub mod claims;
pub mod clock;
pub mod encoder;
pub mod error;
pub mod validator;

mod wire;

pub use claims::Claims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use encoder::{ClaimsEncoder, EncodedPayload};
pub use error::ClaimsError;
pub use stamp_core::{SignerConfig, VerifierConfig};
pub use validator::{ClaimsValidator, inspect_claims_unverified};
