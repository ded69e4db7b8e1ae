//! Adversarial credential construction
//!
//! Builds the malformed, tampered, and algorithm-confused tokens the
//! scenarios send at the gateway. Nothing here validates a token locally;
//! judging a forgery is entirely the gateway's job.

#![allow(dead_code)]

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

/// Secrets a weak deployment might sign access tokens with
pub const WEAK_SECRETS: [&str; 5] = ["secret", "password", "123456", "jwt_secret", ""];

/// Strings that violate the three-segment dot-delimited token structure
pub const MALFORMED_TOKENS: [&str; 7] = [
    "not.a.jwt",
    "eyJhbGciOiJIUzI1NiJ9",
    "eyJhbGciOiJIUzI1NiJ9.eyJ0ZXN0IjoidGVzdCJ9",
    ".....",
    "",
    "null",
    "undefined",
];

/// Language null-literals sometimes serialized into Authorization headers
pub const PLACEHOLDER_TOKENS: [&str; 4] = ["null", "undefined", "None", "nil"];

/// Malformed OAuth id tokens, including injection probes
pub const MALFORMED_ID_TOKENS: [&str; 5] = [
    "not.a.valid.token",
    "eyJhbGciOiJSUzI1NiJ9",
    "<script>alert(1)</script>",
    "' OR '1'='1",
    "${7*7}",
];

/// Refresh tokens the gateway must reject outright
pub const INVALID_REFRESH_TOKENS: [&str; 5] = [
    "",
    "invalid",
    "null",
    "undefined",
    "eyJhbGciOiJIUzI1NiJ9.invalid.signature",
];

/// Claims asserting elevated privilege, expiring an hour out
pub fn admin_claims() -> Value {
    json!({
        "sub": "admin",
        "role": "admin",
        "exp": Utc::now().timestamp() + 3600,
    })
}

/// Token declaring the `none` algorithm with an empty signature segment
pub fn none_algorithm_token(claims: &Value) -> String {
    let header = json!({ "alg": "none", "typ": "JWT" });
    assemble_unsigned(&header, claims)
}

/// Well-formed HS256 header and payload with the signature segment stripped
pub fn stripped_signature_token(claims: &Value) -> String {
    let header = json!({ "alg": "HS256", "typ": "JWT" });
    assemble_unsigned(&header, claims)
}

/// Properly signed HS256 token using a candidate weak secret
pub fn weak_secret_token(claims: &Value, secret: &str) -> Result<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .with_context(|| format!("HS256 signing failed for secret {secret:?}"))
}

/// Decode the payload segment without verifying the signature
pub fn decode_claims_unverified(token: &str) -> Result<Value> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() < 2 {
        bail!("Token has {} segment(s), expected at least 2", segments.len());
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .context("Payload segment is not valid base64url")?;

    serde_json::from_slice(&payload).context("Payload segment is not valid JSON")
}

/// First characters of a credential, for failure messages
pub fn token_prefix(token: &str) -> String {
    if token.chars().count() <= 20 {
        token.to_string()
    } else {
        let prefix: String = token.chars().take(20).collect();
        format!("{prefix}...")
    }
}

fn assemble_unsigned(header: &Value, claims: &Value) -> String {
    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header_b64}.{payload_b64}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_header(token: &str) -> Value {
        let header_b64 = token.split('.').next().unwrap();
        let bytes = URL_SAFE_NO_PAD.decode(header_b64).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_none_algorithm_token_structure() {
        let token = none_algorithm_token(&admin_claims());

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments[2].is_empty());

        assert_eq!(decode_header(&token)["alg"], "none");
    }

    #[test]
    fn test_stripped_signature_token_structure() {
        let token = stripped_signature_token(&admin_claims());

        assert!(token.ends_with('.'));
        assert_eq!(decode_header(&token)["alg"], "HS256");

        let claims = decode_claims_unverified(&token).unwrap();
        assert_eq!(claims["sub"], "admin");
        assert_eq!(claims["role"], "admin");
    }

    #[test]
    fn test_weak_secret_token_is_signed() {
        let token = weak_secret_token(&admin_claims(), "secret").unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(!segments[2].is_empty());

        let claims = decode_claims_unverified(&token).unwrap();
        assert_eq!(claims["role"], "admin");
    }

    #[test]
    fn test_weak_secret_allows_empty_secret() {
        assert!(weak_secret_token(&admin_claims(), "").is_ok());
    }

    #[test]
    fn test_admin_claims_expire_in_future() {
        let claims = admin_claims();
        assert!(claims["exp"].as_i64().unwrap() > Utc::now().timestamp());
    }

    #[test]
    fn test_decode_rejects_single_segment() {
        assert!(decode_claims_unverified("eyJhbGciOiJIUzI1NiJ9").is_err());
        assert!(decode_claims_unverified("garbage").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode_claims_unverified("a.!!!not-base64!!!.c").is_err());
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("short"), "short");

        let long = "x".repeat(40);
        let prefix = token_prefix(&long);
        assert!(prefix.ends_with("..."));
        assert_eq!(prefix.chars().count(), 23);
    }

    #[test]
    fn test_fixed_dictionaries() {
        assert_eq!(WEAK_SECRETS.len(), 5);
        assert!(WEAK_SECRETS.contains(&""));
        assert!(MALFORMED_TOKENS.contains(&"null"));
        assert!(PLACEHOLDER_TOKENS.contains(&"nil"));
        assert!(INVALID_REFRESH_TOKENS.contains(&"invalid"));
    }
}
