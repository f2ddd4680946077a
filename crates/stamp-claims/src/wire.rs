//! Wire form of a claims document: unpadded URL-safe base64 over JSON.

use crate::error::ClaimsError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Emits no padding; accepts input with or without it.
pub(crate) const URL_SAFE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims as they arrive, before any presence or policy check.
///
/// `null` deserializes to `None` and is treated like an absent key.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    pub iss: Option<String>,
    pub sub: Option<String>,
    pub aud: Option<String>,
    pub exp: Option<i64>,
    pub iat: Option<i64>,
    pub roles: Option<BTreeSet<String>>,
}

pub(crate) fn encode(json: &[u8]) -> String {
    URL_SAFE_ENGINE.encode(json)
}

/// Step 1: base64 to text.
///
/// JSON text must be UTF-8, so invalid bytes are a parse failure. The lossy
/// rendering is only used as the diagnostic.
pub(crate) fn decode(encoded: &str) -> Result<String, ClaimsError> {
    let bytes = URL_SAFE_ENGINE
        .decode(encoded)
        .map_err(|_| ClaimsError::InvalidBase64Format(encoded.to_string()))?;
    String::from_utf8(bytes).map_err(|e| {
        ClaimsError::FailedToParseClaims(String::from_utf8_lossy(e.as_bytes()).into_owned())
    })
}

/// Step 2: text to a JSON object.
pub(crate) fn parse_object(text: &str) -> Result<Map<String, Value>, ClaimsError> {
    serde_json::from_str(text).map_err(|_| ClaimsError::FailedToParseClaims(text.to_string()))
}

/// Step 2, typed: a JSON object whose known keys carry the expected types.
pub(crate) fn parse(text: &str) -> Result<RawClaims, ClaimsError> {
    let object = parse_object(text)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|_| ClaimsError::FailedToParseClaims(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_optional_padding() {
        assert_eq!(decode("e30").unwrap(), "{}");
        assert_eq!(decode("e30=").unwrap(), "{}");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let encoded = encode(b"{\"sub\":\"x\xff\"}");
        assert_eq!(
            decode(&encoded).unwrap_err(),
            ClaimsError::FailedToParseClaims("{\"sub\":\"x\u{FFFD}\"}".to_string())
        );
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        // '+' and '/' belong to the standard alphabet only.
        assert_eq!(
            decode("a+b/").unwrap_err(),
            ClaimsError::InvalidBase64Format("a+b/".to_string())
        );
    }

    #[test]
    fn test_parse_requires_object() {
        let text = r#"["iss","sub","aud",1,0]"#;
        assert_eq!(
            parse(text).unwrap_err(),
            ClaimsError::FailedToParseClaims(text.to_string())
        );
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let text = r#"{"sub":"alice","exp":"tomorrow"}"#;
        assert_eq!(
            parse(text).unwrap_err(),
            ClaimsError::FailedToParseClaims(text.to_string())
        );
    }

    #[test]
    fn test_parse_treats_null_as_absent() {
        let raw = parse(r#"{"sub":null,"roles":["a","a","b"],"extra":true}"#).unwrap();
        assert!(raw.sub.is_none());
        assert_eq!(raw.roles.unwrap().len(), 2);
    }
}
