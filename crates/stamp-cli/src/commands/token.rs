//! Claims payload commands.
//!
//! `stamp issue` - Issue an encoded claims payload.
//! `stamp verify` - Verify a payload against the configured policy.
//! `stamp inspect` - Decode a payload without verification.

use anyhow::Context;
use stamp_claims::{
    ClaimsEncoder, ClaimsValidator, Clock, FixedClock, SystemClock, inspect_claims_unverified,
};
use stamp_core::StampConfig;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Wall clock, or a fixed instant when `--now` is given.
fn resolve_clock(now: Option<i64>) -> Arc<dyn Clock> {
    match now {
        Some(epoch) => {
            tracing::info!(now = epoch, "using fixed clock");
            Arc::new(FixedClock(epoch))
        }
        None => Arc::new(SystemClock),
    }
}

/// Load a config, refusing one whose signer and verifier disagree.
fn load_config(path: &Path) -> anyhow::Result<StampConfig> {
    StampConfig::load_checked(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Read the payload from a file if the argument names one, otherwise use it
/// verbatim.
fn resolve_payload(payload: &str) -> anyhow::Result<String> {
    let path = Path::new(payload);
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload from {}", path.display()))?;
        return Ok(content.trim().to_string());
    }
    Ok(payload.to_string())
}

/// Issue an encoded claims payload for `subject`.
pub fn issue(
    config_path: &Path,
    subject: &str,
    roles: Vec<String>,
    now: Option<i64>,
) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    let encoder = ClaimsEncoder::new(config.signer, resolve_clock(now));

    let roles: BTreeSet<String> = roles.into_iter().collect();
    Ok(encoder.create_claims_for(subject, &roles).into_string())
}

/// Verify a payload and render the accepted claims as JSON.
pub fn verify(config_path: &Path, payload: &str, now: Option<i64>) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    let validator = ClaimsValidator::new(config.verifier, resolve_clock(now));

    let payload = resolve_payload(payload)?;
    let claims = validator
        .verify_and_extract_claims(&payload)
        .context("Claims rejected")?;

    Ok(serde_json::to_string_pretty(&claims)?)
}

/// Decode a payload without verification.
pub fn inspect(payload: &str) -> anyhow::Result<String> {
    let payload = resolve_payload(payload)?;
    let value = inspect_claims_unverified(&payload).context("Failed to decode payload")?;
    Ok(serde_json::to_string_pretty(&value)?)
}
