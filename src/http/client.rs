//! HTTP client adapter for the gateway under test
//!
//! Wraps outbound calls to the gateway's auth and API endpoints. Transport
//! failures never reach the caller; they collapse into
//! [`RequestOutcome::NoResponse`] after a diagnostic is logged.

#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::config::{endpoints, ClientHeaderSet, ProbeConfig};
use crate::http::audit;

/// Transport-level errors, reported as diagnostics only
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

/// Normalized response from the gateway
#[derive(Clone, Debug)]
pub struct GatewayResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// True for the statuses a secure gateway answers a bad credential with
    pub fn is_rejected(&self) -> bool {
        matches!(self.status, 400 | 401 | 403)
    }

    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    pub fn body_contains(&self, text: &str) -> bool {
        self.body.contains(text)
    }
}

/// Outcome of one request against the gateway.
///
/// Distinguishes "a response arrived" from "the transport failed" so call
/// sites handle both without unwrapping.
#[derive(Clone, Debug)]
pub enum RequestOutcome {
    Received(GatewayResponse),
    NoResponse,
}

impl RequestOutcome {
    pub fn received(&self) -> Option<&GatewayResponse> {
        match self {
            RequestOutcome::Received(response) => Some(response),
            RequestOutcome::NoResponse => None,
        }
    }

    pub fn is_no_response(&self) -> bool {
        matches!(self, RequestOutcome::NoResponse)
    }
}

/// HTTP client for probing the gateway
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    headers: ClientHeaderSet,
    timeout_secs: u64,
}

impl GatewayClient {
    /// Create a client bound to the configured gateway
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: config.headers.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one request and normalize the result.
    ///
    /// Connection refused, DNS failure, and timeout all come back as
    /// [`RequestOutcome::NoResponse`] with a warning; the scenario decides
    /// what that means.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
        bearer: Option<&str>,
        custom_headers: Option<&HashMap<String, String>>,
    ) -> RequestOutcome {
        let url = self.url(path);

        let mut headers = self.headers.merged(custom_headers);
        if let Some(token) = bearer {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let mut req_builder = self.client.request(method.clone(), &url);
        for (key, value) in &headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &payload {
            req_builder = req_builder.json(body);
        }

        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let diag = if e.is_timeout() {
                    HttpError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    HttpError::ConnectionRefused(url.clone())
                } else {
                    HttpError::RequestFailed(e.to_string())
                };
                warn!("Unable to reach {url}: {diag}");
                audit::record_exchange(method.as_str(), &url, &headers, payload.as_ref(), None);
                return RequestOutcome::NoResponse;
            }
        };

        let status = response.status().as_u16();
        let mut response_headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Unable to read body from {url}: {}", HttpError::BodyRead(e.to_string()));
                audit::record_exchange(method.as_str(), &url, &headers, payload.as_ref(), None);
                return RequestOutcome::NoResponse;
            }
        };

        let gateway_response = GatewayResponse {
            status,
            headers: response_headers,
            body,
        };

        audit::record_exchange(
            method.as_str(),
            &url,
            &headers,
            payload.as_ref(),
            Some(&gateway_response),
        );

        RequestOutcome::Received(gateway_response)
    }

    /// Probe the session status endpoint
    pub async fn auth_status(&self) -> RequestOutcome {
        self.dispatch(Method::GET, endpoints::AUTH_STATUS, None, None, None)
            .await
    }

    /// Attempt a Google OAuth exchange with the given id token
    pub async fn google_auth(&self, id_token: &str) -> RequestOutcome {
        let payload = serde_json::json!({ "idToken": id_token });
        self.dispatch(Method::POST, endpoints::AUTH_GOOGLE, Some(payload), None, None)
            .await
    }

    /// Attempt an Apple OAuth exchange with the given id token
    pub async fn apple_auth(&self, id_token: &str) -> RequestOutcome {
        let payload = serde_json::json!({ "idToken": id_token });
        self.dispatch(Method::POST, endpoints::AUTH_APPLE, Some(payload), None, None)
            .await
    }

    /// Attempt a token refresh
    pub async fn refresh(&self, refresh_token: &str) -> RequestOutcome {
        let payload = serde_json::json!({ "refreshToken": refresh_token });
        self.dispatch(Method::POST, endpoints::AUTH_REFRESH, Some(payload), None, None)
            .await
    }

    /// Fetch a protected resource, with or without a bearer token
    pub async fn protected(&self, path: &str, token: Option<&str>) -> RequestOutcome {
        self.dispatch(Method::GET, path, None, token, None).await
    }

    /// Fetch a protected resource with extra headers on top of the base set
    pub async fn protected_with_headers(
        &self,
        path: &str,
        token: Option<&str>,
        custom_headers: &HashMap<String, String>,
    ) -> RequestOutcome {
        self.dispatch(Method::GET, path, None, token, Some(custom_headers))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> GatewayResponse {
        GatewayResponse {
            status,
            headers: HashMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_response_classification() {
        assert!(response(200, "ok").is_success());
        assert!(response(401, "").is_client_error());
        assert!(response(401, "").is_rejected());
        assert!(response(403, "").is_rejected());
        assert!(response(400, "").is_rejected());
        assert!(!response(500, "").is_rejected());
        assert!(!response(429, "").is_rejected());
    }

    #[test]
    fn test_outcome_handling() {
        let received = RequestOutcome::Received(response(401, ""));
        assert!(received.received().is_some());
        assert!(!received.is_no_response());

        let absent = RequestOutcome::NoResponse;
        assert!(absent.received().is_none());
        assert!(absent.is_no_response());
    }

    #[test]
    fn test_url_building() {
        let config = ProbeConfig::new("http://localhost:8080/");
        let client = GatewayClient::new(&config).unwrap();
        assert_eq!(client.url("/api/profile"), "http://localhost:8080/api/profile");
    }

    #[test]
    fn test_body_contains() {
        let resp = response(200, "<html>backend-a</html>");
        assert!(resp.body_contains("backend-a"));
        assert!(!resp.body_contains("backend-b"));
    }
}
