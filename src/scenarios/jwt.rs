//! JWT forgery scenarios
//!
//! Scenarios 10-17: none-algorithm and weak-secret signing, stripped
//! signatures, structurally malformed tokens, fixture-based expiration and
//! tampering probes.

#![allow(dead_code)]

use anyhow::Result;
use tracing::{debug, info};

use crate::forge;
use crate::http::GatewayClient;
use crate::models::{Scenario, ScenarioResult, ScenarioStatus};

/// Scenario 10: token declaring the `none` algorithm
#[derive(Clone, Debug)]
pub struct NoneAlgorithmScenario {
    pub endpoint: String,
}

impl NoneAlgorithmScenario {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!("Running none-algorithm probe against {}", self.endpoint);
        let start = std::time::Instant::now();

        let token = forge::none_algorithm_token(&forge::admin_claims());
        let outcome = client.protected(&self.endpoint, Some(&token)).await;

        let result = match outcome.received() {
            Some(resp) if resp.is_rejected() => ScenarioResult::pass(
                Scenario::NoneAlgorithm,
                start.elapsed().as_millis() as u64,
            )
            .with_message(format!("✓ none-algorithm token rejected with {}", resp.status)),
            Some(resp) => ScenarioResult::fail(
                Scenario::NoneAlgorithm,
                start.elapsed().as_millis() as u64,
                format!(
                    "none-algorithm token got status {} (expected 400/401/403)",
                    resp.status
                ),
            ),
            None => ScenarioResult::fail(
                Scenario::NoneAlgorithm,
                start.elapsed().as_millis() as u64,
                "No response received",
            ),
        };

        Ok(result)
    }
}

/// Scenario 11: HS256 tokens signed with a dictionary of weak secrets
#[derive(Clone, Debug)]
pub struct WeakSecretScenario {
    pub endpoint: String,
    pub secrets: Vec<String>,
}

impl WeakSecretScenario {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            secrets: forge::WEAK_SECRETS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!(
            "Running weak-secret probe against {} ({} candidates)",
            self.endpoint,
            self.secrets.len()
        );
        let start = std::time::Instant::now();
        let mut accepted = Vec::new();
        let mut details = Vec::new();

        for secret in &self.secrets {
            let token = match forge::weak_secret_token(&forge::admin_claims(), secret) {
                Ok(token) => token,
                Err(e) => {
                    debug!("Signing with secret {secret:?} failed: {e}");
                    details.push(format!("⚠ could not sign with secret {secret:?}"));
                    continue;
                }
            };

            let outcome = client.protected(&self.endpoint, Some(&token)).await;

            match outcome.received() {
                Some(resp) if resp.is_success() => {
                    accepted.push(secret.clone());
                    details.push(format!(
                        "✗ token signed with secret {secret:?} accepted (status {})",
                        resp.status
                    ));
                }
                Some(resp) => {
                    details.push(format!(
                        "✓ secret {secret:?} rejected with {}",
                        resp.status
                    ));
                }
                None => {
                    details.push(format!("⚠ secret {secret:?} got no response"));
                }
            }
        }

        Ok(ScenarioResult {
            scenario: Scenario::WeakSecretSigning,
            status: if accepted.is_empty() {
                ScenarioStatus::Pass
            } else {
                ScenarioStatus::Fail
            },
            duration_ms: start.elapsed().as_millis() as u64,
            message: Some(details.join("\n")),
        })
    }
}

/// Scenario 12: well-formed header and payload, signature segment stripped
#[derive(Clone, Debug)]
pub struct StrippedSignatureScenario {
    pub endpoint: String,
}

impl StrippedSignatureScenario {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!("Running stripped-signature probe against {}", self.endpoint);
        let start = std::time::Instant::now();

        let token = forge::stripped_signature_token(&forge::admin_claims());
        let outcome = client.protected(&self.endpoint, Some(&token)).await;

        let result = match outcome.received() {
            Some(resp) if resp.is_rejected() => ScenarioResult::pass(
                Scenario::StrippedSignature,
                start.elapsed().as_millis() as u64,
            )
            .with_message(format!("✓ stripped signature rejected with {}", resp.status)),
            Some(resp) => ScenarioResult::fail(
                Scenario::StrippedSignature,
                start.elapsed().as_millis() as u64,
                format!(
                    "Stripped-signature token got status {} (expected 400/401/403)",
                    resp.status
                ),
            ),
            None => ScenarioResult::fail(
                Scenario::StrippedSignature,
                start.elapsed().as_millis() as u64,
                "No response received",
            ),
        };

        Ok(result)
    }
}

/// Scenario 13: pre-provisioned expired token must be rejected
#[derive(Clone, Debug)]
pub struct ExpiredTokenScenario {
    pub endpoint: String,
    pub fixture: Option<String>,
}

impl ExpiredTokenScenario {
    pub fn new(endpoint: impl Into<String>, fixture: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fixture,
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        let Some(token) = &self.fixture else {
            return Ok(ScenarioResult::skip(
                Scenario::ExpiredToken,
                "No expired token fixture available",
            ));
        };

        info!("Running expired-token probe against {}", self.endpoint);
        let start = std::time::Instant::now();

        let outcome = client.protected(&self.endpoint, Some(token)).await;

        let result = match outcome.received() {
            Some(resp) if resp.is_rejected() => ScenarioResult::pass(
                Scenario::ExpiredToken,
                start.elapsed().as_millis() as u64,
            )
            .with_message(format!("✓ expired token rejected with {}", resp.status)),
            Some(resp) => ScenarioResult::fail(
                Scenario::ExpiredToken,
                start.elapsed().as_millis() as u64,
                format!(
                    "Expired token got status {} (expected 400/401/403)",
                    resp.status
                ),
            ),
            None => ScenarioResult::fail(
                Scenario::ExpiredToken,
                start.elapsed().as_millis() as u64,
                "No response received",
            ),
        };

        Ok(result)
    }
}

/// Scenario 14: strings violating the three-segment token structure
#[derive(Clone, Debug)]
pub struct MalformedJwtScenario {
    pub endpoint: String,
    pub tokens: Vec<String>,
}

impl MalformedJwtScenario {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tokens: forge::MALFORMED_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!("Running malformed-token probe against {}", self.endpoint);
        let start = std::time::Instant::now();
        let mut accepted = Vec::new();
        let mut details = Vec::new();

        for token in &self.tokens {
            let outcome = client.protected(&self.endpoint, Some(token)).await;

            match outcome.received() {
                Some(resp) if resp.is_success() => {
                    accepted.push(token.clone());
                    details.push(format!(
                        "✗ '{}' accepted with status {}",
                        forge::token_prefix(token),
                        resp.status
                    ));
                }
                Some(resp) => {
                    details.push(format!(
                        "✓ '{}' rejected with {}",
                        forge::token_prefix(token),
                        resp.status
                    ));
                }
                None => {
                    details.push(format!(
                        "⚠ '{}' got no response",
                        forge::token_prefix(token)
                    ));
                }
            }
        }

        Ok(ScenarioResult {
            scenario: Scenario::MalformedJwt,
            status: if accepted.is_empty() {
                ScenarioStatus::Pass
            } else {
                ScenarioStatus::Fail
            },
            duration_ms: start.elapsed().as_millis() as u64,
            message: Some(details.join("\n")),
        })
    }
}

/// Scenario 15: fixture token with a tampered payload
#[derive(Clone, Debug)]
pub struct TamperedPayloadScenario {
    pub endpoint: String,
    pub fixture: Option<String>,
}

impl TamperedPayloadScenario {
    pub fn new(endpoint: impl Into<String>, fixture: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fixture,
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        let Some(token) = &self.fixture else {
            return Ok(ScenarioResult::skip(
                Scenario::TamperedPayload,
                "No tampered token fixture available",
            ));
        };

        info!("Running tampered-payload probe against {}", self.endpoint);
        let start = std::time::Instant::now();

        let outcome = client.protected(&self.endpoint, Some(token)).await;

        let result = match outcome.received() {
            Some(resp) if resp.is_rejected() => ScenarioResult::pass(
                Scenario::TamperedPayload,
                start.elapsed().as_millis() as u64,
            )
            .with_message(format!("✓ tampered token rejected with {}", resp.status)),
            Some(resp) => ScenarioResult::fail(
                Scenario::TamperedPayload,
                start.elapsed().as_millis() as u64,
                format!(
                    "Tampered token got status {} (expected 400/401/403)",
                    resp.status
                ),
            ),
            None => ScenarioResult::fail(
                Scenario::TamperedPayload,
                start.elapsed().as_millis() as u64,
                "No response received",
            ),
        };

        Ok(result)
    }
}

/// Scenario 16: a valid fixture token must carry an expiration claim.
///
/// Decodes locally without signature verification; no request is sent.
#[derive(Clone, Debug)]
pub struct ExpirationClaimScenario {
    pub fixture: Option<String>,
}

impl ExpirationClaimScenario {
    pub fn new(fixture: Option<String>) -> Self {
        Self { fixture }
    }

    pub fn run(&self) -> Result<ScenarioResult> {
        let Some(token) = &self.fixture else {
            return Ok(ScenarioResult::skip(
                Scenario::ExpirationClaim,
                "No valid token fixture available",
            ));
        };

        info!("Checking expiration claim on provisioned token");
        let start = std::time::Instant::now();

        let claims = match forge::decode_claims_unverified(token) {
            Ok(claims) => claims,
            Err(e) => {
                return Ok(ScenarioResult::skip(
                    Scenario::ExpirationClaim,
                    format!("Could not decode token: {e}"),
                ));
            }
        };

        let result = match claims.get("exp") {
            Some(exp) => ScenarioResult::pass(
                Scenario::ExpirationClaim,
                start.elapsed().as_millis() as u64,
            )
            .with_message(format!("✓ token expires at {exp}")),
            None => ScenarioResult::fail(
                Scenario::ExpirationClaim,
                start.elapsed().as_millis() as u64,
                "Token carries no exp claim",
            ),
        };

        Ok(result)
    }
}

/// Scenario 17: refresh-token rotation needs live credentials
#[derive(Clone, Debug)]
pub struct RefreshRotationScenario;

impl RefreshRotationScenario {
    pub fn run(&self) -> Result<ScenarioResult> {
        Ok(ScenarioResult::skip(
            Scenario::RefreshRotation,
            "Requires a live refresh token",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::endpoints;

    #[test]
    fn test_weak_secret_scenario_uses_dictionary() {
        let scenario = WeakSecretScenario::new(endpoints::PROFILE);
        assert_eq!(scenario.secrets.len(), 5);
        assert!(scenario.secrets.contains(&"jwt_secret".to_string()));
    }

    #[test]
    fn test_fixture_scenarios_skip_without_fixture() {
        let result = ExpirationClaimScenario::new(None).run().unwrap();
        assert_eq!(result.status, ScenarioStatus::Skip);

        let result = RefreshRotationScenario.run().unwrap();
        assert_eq!(result.status, ScenarioStatus::Skip);
    }

    #[test]
    fn test_expiration_claim_present() {
        let token = forge::stripped_signature_token(&forge::admin_claims());
        let result = ExpirationClaimScenario::new(Some(token)).run().unwrap();
        assert_eq!(result.status, ScenarioStatus::Pass);
    }

    #[test]
    fn test_expiration_claim_missing() {
        let claims = serde_json::json!({ "sub": "admin" });
        let token = forge::stripped_signature_token(&claims);
        let result = ExpirationClaimScenario::new(Some(token)).run().unwrap();
        assert_eq!(result.status, ScenarioStatus::Fail);
    }

    #[test]
    fn test_expiration_claim_undecodable_skips() {
        let result = ExpirationClaimScenario::new(Some("garbage".to_string()))
            .run()
            .unwrap();
        assert_eq!(result.status, ScenarioStatus::Skip);
    }

    #[test]
    fn test_malformed_jwt_list() {
        let scenario = MalformedJwtScenario::new(endpoints::PROFILE);
        assert_eq!(scenario.tokens.len(), 7);
        assert!(scenario.tokens.contains(&String::new()));
    }
}
