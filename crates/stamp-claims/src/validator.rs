//! Claims decoding and validation.

use crate::claims::Claims;
use crate::clock::Clock;
use crate::error::ClaimsError;
use crate::wire::{self, RawClaims};
use stamp_core::VerifierConfig;
use std::collections::BTreeSet;

/// Claims whose required fields are all present, not yet checked against
/// policy.
struct PresentClaims {
    iss: String,
    sub: String,
    aud: String,
    exp: i64,
    iat: i64,
    roles: BTreeSet<String>,
}

impl RawClaims {
    /// Step 3: presence, in the fixed order `sub, aud, iss, exp, iat`.
    fn require_present(self) -> Result<PresentClaims, ClaimsError> {
        let sub = self
            .sub
            .filter(|s| !s.is_empty())
            .ok_or(ClaimsError::NoSubClaimProvided)?;
        let aud = self.aud.ok_or(ClaimsError::NoAudClaimProvided)?;
        let iss = self.iss.ok_or(ClaimsError::NoIssClaimProvided)?;
        let exp = self.exp.ok_or(ClaimsError::NoExpClaimProvided)?;
        let iat = self.iat.ok_or(ClaimsError::NoIatClaimProvided)?;

        Ok(PresentClaims {
            iss,
            sub,
            aud,
            exp,
            iat,
            roles: self.roles.unwrap_or_default(),
        })
    }
}

/// Verifies incoming claims payloads against a [`VerifierConfig`].
///
/// Stateless apart from its configuration and clock; share freely.
#[derive(Debug, Clone)]
pub struct ClaimsValidator<C> {
    config: VerifierConfig,
    clock: C,
}

impl<C: Clock> ClaimsValidator<C> {
    pub fn new(config: VerifierConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Decode `encoded` and run the validation pipeline, stopping at the
    /// first failing step.
    pub fn verify_and_extract_claims(&self, encoded: &str) -> Result<Claims, ClaimsError> {
        let result = wire::decode(encoded)
            .and_then(|text| wire::parse(&text))
            .and_then(RawClaims::require_present)
            .and_then(|claims| self.check_audience(claims))
            .and_then(|claims| self.check_issuer(claims))
            .and_then(|claims| self.check_times(claims))
            .and_then(|claims| self.check_lifetime(claims))
            .map(|claims| {
                Claims::new(
                    claims.iss,
                    claims.sub,
                    claims.aud,
                    claims.exp,
                    claims.iat,
                    claims.roles,
                )
            });

        match &result {
            Ok(claims) => tracing::debug!(subject = %claims.subject(), "claims accepted"),
            Err(e) => tracing::debug!(reason = %e, "claims rejected"),
        }

        result
    }

    fn check_audience(&self, claims: PresentClaims) -> Result<PresentClaims, ClaimsError> {
        if claims.aud != self.config.audience {
            return Err(ClaimsError::InvalidAudClaim(claims.aud));
        }
        Ok(claims)
    }

    fn check_issuer(&self, claims: PresentClaims) -> Result<PresentClaims, ClaimsError> {
        if claims.iss != self.config.issuer {
            return Err(ClaimsError::InvalidIssClaim(claims.iss));
        }
        Ok(claims)
    }

    /// Steps 6 and 7, both against the same reading of the clock.
    fn check_times(&self, claims: PresentClaims) -> Result<PresentClaims, ClaimsError> {
        let now = self.clock.now();
        let tolerance = self.config.clock_skew_tolerance_secs;

        if claims.exp < now.saturating_sub_unsigned(tolerance) {
            return Err(ClaimsError::ExpiredExpClaim {
                exp: claims.exp,
                now,
            });
        }

        if claims.iat > now.saturating_add_unsigned(tolerance) {
            return Err(ClaimsError::FutureIatClaim {
                iat: claims.iat,
                now,
            });
        }

        Ok(claims)
    }

    fn check_lifetime(&self, claims: PresentClaims) -> Result<PresentClaims, ClaimsError> {
        if claims.iat > claims.exp {
            return Err(ClaimsError::InvalidLifeTime);
        }

        // iat <= exp here, so the distance is exactly exp - iat.
        if claims.exp.abs_diff(claims.iat) > self.config.max_lifetime_secs {
            return Err(ClaimsError::InvalidLifeTime);
        }

        Ok(claims)
    }
}

/// Decode and parse a payload without any policy checks (for debugging).
pub fn inspect_claims_unverified(encoded: &str) -> Result<serde_json::Value, ClaimsError> {
    let text = wire::decode(encoded)?;
    wire::parse_object(&text).map(serde_json::Value::Object)
}
