//! Scenario assertions against a mock gateway
//!
//! Drives the probe scenarios against a wiremock server standing in for the
//! gateway, in both secure and deliberately vulnerable configurations.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gateway_probe::config::{endpoints, ProbeConfig};
use gateway_probe::dataset::TestDataset;
use gateway_probe::http::GatewayClient;
use gateway_probe::models::{Scenario, ScenarioStatus};
use gateway_probe::runner::ScenarioRunner;
use gateway_probe::scenarios::{
    AuthBurstScenario, DistributedBruteForceScenario, EmptyIdTokenScenario, EmptyTokenScenario,
    InvalidRefreshScenario, MissingTokenScenario, NoneAlgorithmScenario, OAuthProvider,
    PlaceholderTokenScenario, RateLimitRecoveryScenario, SqlInjectionScenario,
    WeakSecretScenario, XssReflectionScenario,
};

fn client_for(server: &MockServer) -> GatewayClient {
    let config = ProbeConfig::new(server.uri()).with_timeout(5);
    GatewayClient::new(&config).unwrap()
}

/// A gateway that rejects everything with 401
async fn secure_gateway() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"unauthorized"}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid token"}"#))
        .mount(&server)
        .await;

    server
}

/// A gateway that accepts everything with 200
async fn vulnerable_gateway() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"user":"admin"}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"accessToken":"t"}"#))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn missing_token_passes_when_gateway_rejects() {
    let server = secure_gateway().await;

    let result = MissingTokenScenario::new()
        .add_endpoint(endpoints::PROFILE)
        .add_endpoint(endpoints::STORIES)
        .add_endpoint(endpoints::USER_PREFERENCES)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Pass);
}

#[tokio::test]
async fn missing_token_fails_when_gateway_accepts() {
    let server = vulnerable_gateway().await;

    let result = MissingTokenScenario::new()
        .add_endpoint(endpoints::PROFILE)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
    assert!(result.message.unwrap().contains("200"));
}

#[tokio::test]
async fn missing_token_requires_exactly_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = MissingTokenScenario::new()
        .add_endpoint(endpoints::PROFILE)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn empty_and_placeholder_tokens_rejected() {
    let server = secure_gateway().await;
    let client = client_for(&server);

    let result = EmptyTokenScenario::new(endpoints::PROFILE)
        .run(&client)
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Pass);

    let result = PlaceholderTokenScenario::new(endpoints::PROFILE)
        .run(&client)
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Pass);
}

#[tokio::test]
async fn placeholder_token_fails_on_acceptance() {
    let server = vulnerable_gateway().await;

    let result = PlaceholderTokenScenario::new(endpoints::PROFILE)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn sql_injection_rejected_without_error_trace() {
    let server = secure_gateway().await;

    let result = SqlInjectionScenario::new(OAuthProvider::Google)
        .with_payloads(TestDataset::builtin().credentials.sql_injections)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Pass);
}

#[tokio::test]
async fn sql_injection_fails_when_error_trace_leaks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::AUTH_APPLE))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("You have an error in your SQL syntax near ''1'='1'"),
        )
        .mount(&server)
        .await;

    let result = SqlInjectionScenario::new(OAuthProvider::Apple)
        .with_payloads(TestDataset::builtin().credentials.sql_injections)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
    assert!(result.message.unwrap().contains("SQL error trace"));
}

#[tokio::test]
async fn xss_payload_reflection_detected() {
    let payload = "<script>alert(1)</script>";

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(format!("bad token: {payload}")),
        )
        .mount(&server)
        .await;

    let result = XssReflectionScenario::new(endpoints::PROFILE)
        .with_payloads(vec![payload.to_string()])
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn xss_passes_when_payload_not_reflected() {
    let server = secure_gateway().await;

    let result = XssReflectionScenario::new(endpoints::PROFILE)
        .with_payloads(TestDataset::builtin().credentials.xss_payloads)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Pass);
}

#[tokio::test]
async fn empty_id_token_must_yield_400_or_401() {
    let server = secure_gateway().await;
    let result = EmptyIdTokenScenario::new(OAuthProvider::Google)
        .run(&client_for(&server))
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Pass);

    let server = vulnerable_gateway().await;
    let result = EmptyIdTokenScenario::new(OAuthProvider::Apple)
        .run(&client_for(&server))
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn forged_tokens_must_not_be_accepted() {
    let server = vulnerable_gateway().await;
    let client = client_for(&server);

    let result = NoneAlgorithmScenario::new(endpoints::PROFILE)
        .run(&client)
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Fail);

    let result = WeakSecretScenario::new(endpoints::PROFILE)
        .run(&client)
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn forged_token_rejection_passes() {
    let server = secure_gateway().await;
    let client = client_for(&server);

    let result = NoneAlgorithmScenario::new(endpoints::PROFILE)
        .run(&client)
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Pass);

    let result = WeakSecretScenario::new(endpoints::PROFILE)
        .run(&client)
        .await
        .unwrap();
    assert_eq!(result.status, ScenarioStatus::Pass);
}

#[tokio::test]
async fn auth_burst_warns_but_passes_without_rate_limiting() {
    let server = secure_gateway().await;

    let result = AuthBurstScenario::new(5)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Pass);
    assert!(result.message.unwrap().contains("no rate limiting detected"));
}

#[tokio::test]
async fn auth_burst_reports_active_rate_limiting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = AuthBurstScenario::new(5)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Pass);
    assert!(result.message.unwrap().contains("rate limiting is active"));
}

#[tokio::test]
async fn recovery_fails_when_still_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    // Zero cool-down keeps the test fast; the window logic is identical
    let result = RateLimitRecoveryScenario::new(3, 0)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn spoofed_forwarded_ip_must_not_grant_access() {
    let server = vulnerable_gateway().await;

    let result = DistributedBruteForceScenario::new(endpoints::PROFILE)
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Fail);
}

#[tokio::test]
async fn invalid_refresh_tokens_each_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::AUTH_REFRESH))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let result = InvalidRefreshScenario::new()
        .run(&client_for(&server))
        .await
        .unwrap();

    assert_eq!(result.status, ScenarioStatus::Pass);
}

#[tokio::test]
async fn runner_accounts_for_skips_and_fixture_gaps() {
    let server = secure_gateway().await;

    let config = ProbeConfig::new(server.uri()).with_timeout(5);
    let runner = ScenarioRunner::new(config, TestDataset::builtin())
        .unwrap()
        .with_skip(vec![4]);

    let summary = runner
        .run_scenarios(&[
            Scenario::MissingToken,     // skipped by configuration
            Scenario::EmptyToken,       // 401 -> pass
            Scenario::ExpiredToken,     // no fixture -> skip
            Scenario::RefreshRotation,  // always skipped
        ])
        .await;

    assert_eq!(summary.total, 4);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_clean());
}
