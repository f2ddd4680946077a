//! Claims issuing.

use crate::claims::Claims;
use crate::clock::Clock;
use crate::wire;
use stamp_core::SignerConfig;
use std::collections::BTreeSet;
use std::fmt;

/// A claims document in its transport-safe text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EncodedPayload> for String {
    fn from(payload: EncodedPayload) -> Self {
        payload.0
    }
}

impl Claims {
    /// Serialize to JSON and wrap in unpadded URL-safe base64.
    pub fn encode(&self) -> EncodedPayload {
        EncodedPayload(wire::encode(self.to_json().as_bytes()))
    }
}

/// Builds claims for already-authenticated subjects.
///
/// Holds only immutable configuration and a clock, so one encoder can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct ClaimsEncoder<C> {
    config: SignerConfig,
    clock: C,
}

impl<C: Clock> ClaimsEncoder<C> {
    pub fn new(config: SignerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Build the claims document for `subject`, issued now.
    ///
    /// The subject is not validated here; the receiving side does that.
    pub fn build_claims(&self, subject: &str, roles: &BTreeSet<String>) -> Claims {
        let issued_at = self.clock.now();
        let expires_at = issued_at.saturating_add_unsigned(self.config.lifetime_secs);

        Claims::new(
            self.config.issuer.clone(),
            subject.to_string(),
            self.config.audience.clone(),
            expires_at,
            issued_at,
            roles.clone(),
        )
    }

    /// Build and encode the claims document for `subject`.
    pub fn create_claims_for(&self, subject: &str, roles: &BTreeSet<String>) -> EncodedPayload {
        let claims = self.build_claims(subject, roles);
        tracing::debug!(
            subject = %claims.subject(),
            roles = claims.roles().len(),
            expires_at = claims.expires_at(),
            "issued claims"
        );
        claims.encode()
    }
}
