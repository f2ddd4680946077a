//! The canonical claims document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Identity and time claims carried in a token payload.
///
/// Built once by [`ClaimsEncoder`](crate::ClaimsEncoder) or
/// [`ClaimsValidator`](crate::ClaimsValidator) and never mutated afterwards.
/// Serializes with keys in the order `iss, sub, aud, exp, iat[, roles]`;
/// `roles` is omitted entirely when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    #[serde(rename = "iss")]
    issuer: String,

    #[serde(rename = "sub")]
    subject: String,

    #[serde(rename = "aud")]
    audience: String,

    #[serde(rename = "exp")]
    expires_at: i64,

    #[serde(rename = "iat")]
    issued_at: i64,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    roles: BTreeSet<String>,
}

impl Claims {
    pub(crate) fn new(
        issuer: String,
        subject: String,
        audience: String,
        expires_at: i64,
        issued_at: i64,
        roles: BTreeSet<String>,
    ) -> Self {
        Self {
            issuer,
            subject,
            audience,
            expires_at,
            issued_at,
            roles,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// `exp`, in epoch seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// `iat`, in epoch seconds.
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Check if the subject holds a role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// `exp - iat`, or `None` if the difference does not fit in an `i64`.
    pub fn lifetime_secs(&self) -> Option<i64> {
        self.expires_at.checked_sub(self.issued_at)
    }

    pub fn issued_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.issued_at, 0)
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    /// Canonical JSON text of this document.
    pub fn to_json(&self) -> String {
        // Only strings, integers and a string set: serialization cannot fail.
        serde_json::to_string(self).expect("claims serialize to JSON")
    }
}
