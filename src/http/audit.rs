//! Request/response audit logging
//!
//! Records every exchange with the gateway for later review. Token-like
//! payload fields are masked before they hit the log stream.

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::http::client::GatewayResponse;

/// Placeholder written in place of credential values
const MASK: &str = "***";

/// Longest body excerpt recorded per response
const BODY_EXCERPT_CHARS: usize = 500;

/// Record one request/response exchange.
///
/// `response` is `None` when the transport failed and no response exists.
pub fn record_exchange(
    method: &str,
    url: &str,
    headers: &HashMap<String, String>,
    payload: Option<&Value>,
    response: Option<&GatewayResponse>,
) {
    info!("PROBE: {method} {url} at {}", Utc::now().to_rfc3339());

    debug!("Request headers: {:?}", masked_headers(headers));

    if let Some(payload) = payload {
        debug!("Request payload: {}", masked_payload(payload));
    }

    match response {
        Some(response) => {
            debug!("Response status: {}", response.status);
            debug!("Response headers: {:?}", response.headers);
            debug!("Response body: {}", body_excerpt(&response.body));
        }
        None => {
            debug!("No response (transport failure)");
        }
    }
}

/// Mask header values that carry credentials
fn masked_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            let lower = k.to_lowercase();
            if lower.contains("token") || lower == "authorization" {
                (k.clone(), MASK.to_string())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}

/// Mask any payload field whose name mentions a token.
///
/// Non-object payloads are logged as-is; they carry no named credential
/// fields to mask.
fn masked_payload(payload: &Value) -> Value {
    match payload {
        Value::Object(map) => {
            let masked = map
                .iter()
                .map(|(k, v)| {
                    if k.to_lowercase().contains("token") {
                        (k.clone(), Value::String(MASK.to_string()))
                    } else {
                        (k.clone(), v.clone())
                    }
                })
                .collect();
            Value::Object(masked)
        }
        other => other.clone(),
    }
}

/// First 500 characters of the body, safe on any UTF-8 input
fn body_excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        body.to_string()
    } else {
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{excerpt}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_fields_masked() {
        let payload = json!({
            "idToken": "eyJhbGciOiJSUzI1NiJ9.secret.sig",
            "refreshToken": "refresh-secret",
            "deviceId": "device-1",
        });

        let masked = masked_payload(&payload);
        assert_eq!(masked["idToken"], "***");
        assert_eq!(masked["refreshToken"], "***");
        assert_eq!(masked["deviceId"], "device-1");
    }

    #[test]
    fn test_mask_is_case_insensitive() {
        let payload = json!({ "Access_Token": "abc" });
        assert_eq!(masked_payload(&payload)["Access_Token"], "***");
    }

    #[test]
    fn test_authorization_header_masked() {
        let mut headers = std::collections::HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer secret".to_string());
        headers.insert("X-Client-Platform".to_string(), "ios".to_string());

        let masked = masked_headers(&headers);
        assert_eq!(masked.get("Authorization"), Some(&"***".to_string()));
        assert_eq!(masked.get("X-Client-Platform"), Some(&"ios".to_string()));
    }

    #[test]
    fn test_non_object_payload_untouched() {
        let payload = json!("raw string body");
        assert_eq!(masked_payload(&payload), payload);
    }

    #[test]
    fn test_body_excerpt_truncation() {
        let short = "tiny body";
        assert_eq!(body_excerpt(short), short);

        let long = "x".repeat(600);
        let excerpt = body_excerpt(&long);
        assert_eq!(excerpt.chars().count(), 503);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_body_excerpt_multibyte_safe() {
        let long = "é".repeat(600);
        let excerpt = body_excerpt(&long);
        assert!(excerpt.ends_with("..."));
    }
}
