//! Assertion scenario implementations
//!
//! Each scenario is a pure sequence: build credential(s), invoke the
//! adapter, assert on the outcome.
//!
//! ## Scenario Families
//!
//! ### Injection (1-3)
//! SQL injection via OAuth exchanges, XSS reflection via bearer headers.
//!
//! ### Unauthorized Access (4-6)
//! Missing, empty, and placeholder credentials against protected endpoints.
//!
//! ### OAuth Bypass (7-9)
//! Empty and malformed id tokens against the exchange endpoints.
//!
//! ### JWT Forgery (10-17)
//! None-algorithm, weak-secret, stripped-signature, malformed, expired,
//! and tampered tokens; expiration-claim and rotation checks.
//!
//! ### Abuse Resistance (18-24)
//! Rate-limit bursts and recovery, brute force, proxy spoofing, refresh
//! abuse.

#![allow(dead_code)]

mod injection;
mod jwt;
mod oauth;
mod rate_limit;
mod unauthorized;

pub use injection::{SqlInjectionScenario, XssReflectionScenario};
pub use jwt::{
    ExpirationClaimScenario, ExpiredTokenScenario, MalformedJwtScenario, NoneAlgorithmScenario,
    RefreshRotationScenario, StrippedSignatureScenario, TamperedPayloadScenario,
    WeakSecretScenario,
};
pub use oauth::{EmptyIdTokenScenario, MalformedIdTokenScenario};
pub use rate_limit::{
    ApiBurstScenario, AuthBurstScenario, BruteForceScenario, DistributedBruteForceScenario,
    InvalidRefreshScenario, RateLimitRecoveryScenario, RefreshBurstScenario, FAKE_BEARER,
};
pub use unauthorized::{EmptyTokenScenario, MissingTokenScenario, PlaceholderTokenScenario};

use anyhow::Result;

use crate::config::{endpoints, ProbeConfig};
use crate::dataset::TestDataset;
use crate::http::{GatewayClient, RequestOutcome};
use crate::models::{Scenario, ScenarioResult};

/// OAuth provider whose exchange endpoint a scenario targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Apple,
}

impl OAuthProvider {
    pub fn name(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Apple => "Apple",
        }
    }

    /// Exchange an id token at this provider's gateway endpoint
    pub async fn exchange(&self, client: &GatewayClient, id_token: &str) -> RequestOutcome {
        match self {
            OAuthProvider::Google => client.google_auth(id_token).await,
            OAuthProvider::Apple => client.apple_auth(id_token).await,
        }
    }
}

/// Run a single scenario with the configured inputs
pub async fn run_scenario(
    scenario: Scenario,
    client: &GatewayClient,
    config: &ProbeConfig,
    dataset: &TestDataset,
) -> Result<ScenarioResult> {
    match scenario {
        Scenario::SqlInjectionGoogle => {
            SqlInjectionScenario::new(OAuthProvider::Google)
                .with_payloads(dataset.credentials.sql_injections.clone())
                .run(client)
                .await
        }
        Scenario::SqlInjectionApple => {
            SqlInjectionScenario::new(OAuthProvider::Apple)
                .with_payloads(dataset.credentials.sql_injections.clone())
                .run(client)
                .await
        }
        Scenario::XssBearerReflection => {
            XssReflectionScenario::new(endpoints::PROFILE)
                .with_payloads(dataset.credentials.xss_payloads.clone())
                .run(client)
                .await
        }
        Scenario::MissingToken => {
            MissingTokenScenario::new()
                .add_endpoint(endpoints::PROFILE)
                .add_endpoint(endpoints::STORIES)
                .add_endpoint(endpoints::USER_PREFERENCES)
                .run(client)
                .await
        }
        Scenario::EmptyToken => EmptyTokenScenario::new(endpoints::PROFILE).run(client).await,
        Scenario::PlaceholderToken => {
            PlaceholderTokenScenario::new(endpoints::PROFILE)
                .run(client)
                .await
        }
        Scenario::EmptyIdTokenGoogle => {
            EmptyIdTokenScenario::new(OAuthProvider::Google)
                .run(client)
                .await
        }
        Scenario::EmptyIdTokenApple => {
            EmptyIdTokenScenario::new(OAuthProvider::Apple)
                .run(client)
                .await
        }
        Scenario::MalformedIdToken => MalformedIdTokenScenario::new().run(client).await,
        Scenario::NoneAlgorithm => {
            NoneAlgorithmScenario::new(endpoints::PROFILE)
                .run(client)
                .await
        }
        Scenario::WeakSecretSigning => {
            WeakSecretScenario::new(endpoints::PROFILE).run(client).await
        }
        Scenario::StrippedSignature => {
            StrippedSignatureScenario::new(endpoints::PROFILE)
                .run(client)
                .await
        }
        Scenario::ExpiredToken => {
            let fixture = dataset.jwt.expired_token.as_ref().map(|f| f.jwt.clone());
            ExpiredTokenScenario::new(endpoints::PROFILE, fixture)
                .run(client)
                .await
        }
        Scenario::MalformedJwt => {
            MalformedJwtScenario::new(endpoints::PROFILE)
                .run(client)
                .await
        }
        Scenario::TamperedPayload => {
            let fixture = dataset
                .jwt
                .jwt_tampering
                .as_ref()
                .map(|f| f.invalid_signature_token.clone());
            TamperedPayloadScenario::new(endpoints::PROFILE, fixture)
                .run(client)
                .await
        }
        Scenario::ExpirationClaim => {
            let fixture = dataset.jwt.valid_token.as_ref().map(|f| f.jwt.clone());
            ExpirationClaimScenario::new(fixture).run()
        }
        Scenario::RefreshRotation => RefreshRotationScenario.run(),
        Scenario::AuthRateLimit => AuthBurstScenario::new(config.auth_burst).run(client).await,
        Scenario::ApiRateLimit => {
            ApiBurstScenario::new(endpoints::STORIES, config.api_burst)
                .run(client)
                .await
        }
        Scenario::RateLimitRecovery => {
            RateLimitRecoveryScenario::new(config.auth_burst, config.cooldown_secs)
                .run(client)
                .await
        }
        Scenario::BruteForce => {
            BruteForceScenario::new(config.brute_force_attempts)
                .run(client)
                .await
        }
        Scenario::DistributedBruteForce => {
            DistributedBruteForceScenario::new(endpoints::PROFILE)
                .run(client)
                .await
        }
        Scenario::RefreshRateLimit => {
            RefreshBurstScenario::new(config.auth_burst).run(client).await
        }
        Scenario::InvalidRefreshToken => InvalidRefreshScenario::new().run(client).await,
    }
}
