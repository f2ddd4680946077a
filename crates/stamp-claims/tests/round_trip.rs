//! Issue-then-verify tests across the public API.
//!
//! Run with: cargo test --package stamp-claims --test round_trip

use stamp_claims::{
    ClaimsEncoder, ClaimsError, ClaimsValidator, FixedClock, SignerConfig, VerifierConfig,
    inspect_claims_unverified,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

const ISSUER: &str = "auth.example.com";
const AUDIENCE: &str = "api.example.com";
const ISSUED_AT: i64 = 1_700_000_000;

fn encoder() -> ClaimsEncoder<FixedClock> {
    ClaimsEncoder::new(
        SignerConfig::new(ISSUER, AUDIENCE).with_lifetime_secs(900),
        FixedClock(ISSUED_AT),
    )
}

fn validator_at(now: i64) -> ClaimsValidator<FixedClock> {
    ClaimsValidator::new(
        VerifierConfig::new(ISSUER, AUDIENCE)
            .with_clock_skew_tolerance_secs(30)
            .with_max_lifetime_secs(3600),
        FixedClock(now),
    )
}

fn roles(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|r| r.to_string()).collect()
}

#[test]
fn test_round_trip_preserves_identity_and_lifetime() {
    for (subject, role_set) in [
        ("alice", roles(&[])),
        ("bob", roles(&["admin"])),
        ("carol@example.com", roles(&["reader", "writer", "auditor"])),
        ("ünïcødé user", roles(&["røle"])),
    ] {
        let payload = encoder().create_claims_for(subject, &role_set);
        let claims = validator_at(ISSUED_AT)
            .verify_and_extract_claims(payload.as_str())
            .unwrap();

        assert_eq!(claims.subject(), subject);
        assert_eq!(claims.roles(), &role_set);
        assert_eq!(claims.issuer(), ISSUER);
        assert_eq!(claims.audience(), AUDIENCE);
        assert_eq!(claims.issued_at(), ISSUED_AT);
        assert_eq!(claims.lifetime_secs(), Some(900));
    }
}

#[test]
fn test_empty_roles_omitted_on_the_wire() {
    let payload = encoder().create_claims_for("alice", &BTreeSet::new());
    let doc = inspect_claims_unverified(payload.as_str()).unwrap();
    assert!(doc.get("roles").is_none());

    let claims = validator_at(ISSUED_AT)
        .verify_and_extract_claims(payload.as_str())
        .unwrap();
    assert!(claims.roles().is_empty());
}

#[test]
fn test_issued_payload_expires() {
    let payload = encoder().create_claims_for("alice", &roles(&["admin"]));
    let exp = ISSUED_AT + 900;

    // Still inside the skew window.
    assert!(validator_at(exp + 30)
        .verify_and_extract_claims(payload.as_str())
        .is_ok());

    assert_eq!(
        validator_at(exp + 31).verify_and_extract_claims(payload.as_str()),
        Err(ClaimsError::ExpiredExpClaim {
            exp,
            now: exp + 31
        })
    );
}

#[test]
fn test_payload_from_the_future_is_rejected() {
    let payload = encoder().create_claims_for("alice", &BTreeSet::new());
    assert_eq!(
        validator_at(ISSUED_AT - 31).verify_and_extract_claims(payload.as_str()),
        Err(ClaimsError::FutureIatClaim {
            iat: ISSUED_AT,
            now: ISSUED_AT - 31
        })
    );
}

#[test]
fn test_foreign_deployment_is_rejected() {
    let foreign = ClaimsEncoder::new(
        SignerConfig::new(ISSUER, "billing.example.com"),
        FixedClock(ISSUED_AT),
    );
    let payload = foreign.create_claims_for("alice", &BTreeSet::new());
    assert_eq!(
        validator_at(ISSUED_AT).verify_and_extract_claims(payload.as_str()),
        Err(ClaimsError::InvalidAudClaim("billing.example.com".to_string()))
    );
}

#[test]
fn test_lifetime_above_policy_is_rejected() {
    let long_lived = ClaimsEncoder::new(
        SignerConfig::new(ISSUER, AUDIENCE).with_lifetime_secs(7200),
        FixedClock(ISSUED_AT),
    );
    let payload = long_lived.create_claims_for("alice", &BTreeSet::new());
    assert_eq!(
        validator_at(ISSUED_AT).verify_and_extract_claims(payload.as_str()),
        Err(ClaimsError::InvalidLifeTime)
    );
}

#[test]
fn test_shared_across_threads() {
    let encoder = Arc::new(encoder());
    let validator = Arc::new(validator_at(ISSUED_AT));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let encoder = Arc::clone(&encoder);
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let subject = format!("worker-{i}");
                let payload = encoder.create_claims_for(&subject, &BTreeSet::new());
                validator
                    .verify_and_extract_claims(payload.as_str())
                    .map(|claims| claims.subject().to_string())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Ok(format!("worker-{i}")));
    }
}

#[test]
fn test_encoded_claims_validate_against_schema() {
    let payload = encoder().create_claims_for("alice", &roles(&["admin", "reader"]));
    let instance = inspect_claims_unverified(payload.as_str()).expect("payload must decode");

    let schema: serde_json::Value =
        serde_json::from_str(include_str!("../../../schemas/Claims.schema.json"))
            .expect("schema must parse");

    let validator = jsonschema::draft202012::options()
        .build(&schema)
        .expect("schema must compile");

    if !validator.is_valid(&instance) {
        let mut msgs = Vec::new();
        for (idx, err) in validator.iter_errors(&instance).take(20).enumerate() {
            msgs.push(format!("{}: {}", idx + 1, err));
        }
        panic!("claims did not validate: {}", msgs.join("; "));
    }
}
