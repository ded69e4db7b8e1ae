//! Unauthorized access scenarios
//!
//! Scenarios 4-6: protected endpoints hit with no token, an empty token,
//! and language null-literal placeholders.

#![allow(dead_code)]

use anyhow::Result;
use tracing::info;

use crate::forge;
use crate::http::GatewayClient;
use crate::models::{Scenario, ScenarioResult, ScenarioStatus};

/// Scenario 4: no Authorization header at all
#[derive(Clone, Debug)]
pub struct MissingTokenScenario {
    pub endpoints: Vec<String>,
}

impl MissingTokenScenario {
    pub fn new() -> Self {
        Self {
            endpoints: Vec::new(),
        }
    }

    pub fn add_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!("Running missing-token probe");
        let start = std::time::Instant::now();
        let mut all_rejected = true;
        let mut details = Vec::new();

        for endpoint in &self.endpoints {
            let outcome = client.protected(endpoint, None).await;

            match outcome.received() {
                Some(resp) if resp.status == 401 => {
                    details.push(format!("✓ {endpoint} returned 401"));
                }
                Some(resp) => {
                    all_rejected = false;
                    details.push(format!(
                        "✗ {endpoint} returned {} without credentials (expected exactly 401)",
                        resp.status
                    ));
                }
                None => {
                    all_rejected = false;
                    details.push(format!("✗ {endpoint} got no response"));
                }
            }
        }

        Ok(ScenarioResult {
            scenario: Scenario::MissingToken,
            status: if all_rejected {
                ScenarioStatus::Pass
            } else {
                ScenarioStatus::Fail
            },
            duration_ms: start.elapsed().as_millis() as u64,
            message: Some(details.join("\n")),
        })
    }
}

impl Default for MissingTokenScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Scenario 5: empty string as the bearer token
#[derive(Clone, Debug)]
pub struct EmptyTokenScenario {
    pub endpoint: String,
}

impl EmptyTokenScenario {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!("Running empty-token probe against {}", self.endpoint);
        let start = std::time::Instant::now();

        let outcome = client.protected(&self.endpoint, Some("")).await;

        let result = match outcome.received() {
            Some(resp) if resp.status == 401 => ScenarioResult::pass(
                Scenario::EmptyToken,
                start.elapsed().as_millis() as u64,
            )
            .with_message(format!("✓ {} returned 401", self.endpoint)),
            Some(resp) => ScenarioResult::fail(
                Scenario::EmptyToken,
                start.elapsed().as_millis() as u64,
                format!("Empty token got status {} (expected exactly 401)", resp.status),
            ),
            None => ScenarioResult::fail(
                Scenario::EmptyToken,
                start.elapsed().as_millis() as u64,
                "No response received",
            ),
        };

        Ok(result)
    }
}

/// Scenario 6: "null", "undefined", "None", "nil" as the bearer token
#[derive(Clone, Debug)]
pub struct PlaceholderTokenScenario {
    pub endpoint: String,
    pub tokens: Vec<String>,
}

impl PlaceholderTokenScenario {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tokens: forge::PLACEHOLDER_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    pub async fn run(&self, client: &GatewayClient) -> Result<ScenarioResult> {
        info!("Running placeholder-token probe against {}", self.endpoint);
        let start = std::time::Instant::now();
        let mut accepted = Vec::new();
        let mut details = Vec::new();

        for token in &self.tokens {
            let outcome = client.protected(&self.endpoint, Some(token)).await;

            match outcome.received() {
                Some(resp) if resp.is_success() => {
                    accepted.push(token.clone());
                    details.push(format!("✗ '{token}' accepted with status {}", resp.status));
                }
                Some(resp) => {
                    details.push(format!("✓ '{token}' rejected with {}", resp.status));
                }
                None => {
                    details.push(format!("⚠ '{token}' got no response"));
                }
            }
        }

        Ok(ScenarioResult {
            scenario: Scenario::PlaceholderToken,
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
