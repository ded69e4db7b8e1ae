//! Scenario catalog and result models
//!
//! Defines the probe scenarios, their results, and status types.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// All 24 probe scenarios against the gateway
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // Injection scenarios (1-3)
    SqlInjectionGoogle,
    SqlInjectionApple,
    XssBearerReflection,

    // Unauthorized access scenarios (4-6)
    MissingToken,
    EmptyToken,
    PlaceholderToken,

    // OAuth bypass scenarios (7-9)
    EmptyIdTokenGoogle,
    EmptyIdTokenApple,
    MalformedIdToken,

    // JWT forgery scenarios (10-17)
    NoneAlgorithm,
    WeakSecretSigning,
    StrippedSignature,
    ExpiredToken,
    MalformedJwt,
    TamperedPayload,
    ExpirationClaim,
    RefreshRotation,

    // Abuse resistance scenarios (18-24)
    AuthRateLimit,
    ApiRateLimit,
    RateLimitRecovery,
    BruteForce,
    DistributedBruteForce,
    RefreshRateLimit,
    InvalidRefreshToken,
}

impl Scenario {
    /// Get scenario number (1-24)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::SqlInjectionGoogle => 1,
            Scenario::SqlInjectionApple => 2,
            Scenario::XssBearerReflection => 3,
            Scenario::MissingToken => 4,
            Scenario::EmptyToken => 5,
            Scenario::PlaceholderToken => 6,
            Scenario::EmptyIdTokenGoogle => 7,
            Scenario::EmptyIdTokenApple => 8,
            Scenario::MalformedIdToken => 9,
            Scenario::NoneAlgorithm => 10,
            Scenario::WeakSecretSigning => 11,
            Scenario::StrippedSignature => 12,
            Scenario::ExpiredToken => 13,
            Scenario::MalformedJwt => 14,
            Scenario::TamperedPayload => 15,
            Scenario::ExpirationClaim => 16,
            Scenario::RefreshRotation => 17,
            Scenario::AuthRateLimit => 18,
            Scenario::ApiRateLimit => 19,
            Scenario::RateLimitRecovery => 20,
            Scenario::BruteForce => 21,
            Scenario::DistributedBruteForce => 22,
            Scenario::RefreshRateLimit => 23,
            Scenario::InvalidRefreshToken => 24,
        }
    }

    /// Get scenario name
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::SqlInjectionGoogle => "SQL Injection (Google)",
            Scenario::SqlInjectionApple => "SQL Injection (Apple)",
            Scenario::XssBearerReflection => "XSS Bearer Reflection",
            Scenario::MissingToken => "Missing Token",
            Scenario::EmptyToken => "Empty Token",
            Scenario::PlaceholderToken => "Placeholder Token",
            Scenario::EmptyIdTokenGoogle => "Empty ID Token (Google)",
            Scenario::EmptyIdTokenApple => "Empty ID Token (Apple)",
            Scenario::MalformedIdToken => "Malformed ID Token",
            Scenario::NoneAlgorithm => "None Algorithm",
            Scenario::WeakSecretSigning => "Weak Secret Signing",
            Scenario::StrippedSignature => "Stripped Signature",
            Scenario::ExpiredToken => "Expired Token",
            Scenario::MalformedJwt => "Malformed JWT",
            Scenario::TamperedPayload => "Tampered Payload",
            Scenario::ExpirationClaim => "Expiration Claim",
            Scenario::RefreshRotation => "Refresh Rotation",
            Scenario::AuthRateLimit => "Auth Rate Limit",
            Scenario::ApiRateLimit => "API Rate Limit",
            Scenario::RateLimitRecovery => "Rate Limit Recovery",
            Scenario::BruteForce => "Brute Force",
            Scenario::DistributedBruteForce => "Distributed Brute Force",
            Scenario::RefreshRateLimit => "Refresh Rate Limit",
            Scenario::InvalidRefreshToken => "Invalid Refresh Token",
        }
    }

    /// Get scenario category
    pub fn category(&self) -> &'static str {
        match self {
            Scenario::SqlInjectionGoogle
            | Scenario::SqlInjectionApple
            | Scenario::XssBearerReflection => "Injection",
            Scenario::MissingToken | Scenario::EmptyToken | Scenario::PlaceholderToken => {
                "Unauthorized"
            }
            Scenario::EmptyIdTokenGoogle
            | Scenario::EmptyIdTokenApple
            | Scenario::MalformedIdToken => "OAuth",
            Scenario::NoneAlgorithm
            | Scenario::WeakSecretSigning
            | Scenario::StrippedSignature
            | Scenario::ExpiredToken
            | Scenario::MalformedJwt
            | Scenario::TamperedPayload
            | Scenario::ExpirationClaim
            | Scenario::RefreshRotation => "JWT",
            _ => "Abuse",
        }
    }

    /// Get all scenarios in execution order
    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::SqlInjectionGoogle,
            Scenario::SqlInjectionApple,
            Scenario::XssBearerReflection,
            Scenario::MissingToken,
            Scenario::EmptyToken,
            Scenario::PlaceholderToken,
            Scenario::EmptyIdTokenGoogle,
            Scenario::EmptyIdTokenApple,
            Scenario::MalformedIdToken,
            Scenario::NoneAlgorithm,
            Scenario::WeakSecretSigning,
            Scenario::StrippedSignature,
            Scenario::ExpiredToken,
            Scenario::MalformedJwt,
            Scenario::TamperedPayload,
            Scenario::ExpirationClaim,
            Scenario::RefreshRotation,
            Scenario::AuthRateLimit,
            Scenario::ApiRateLimit,
            Scenario::RateLimitRecovery,
            Scenario::BruteForce,
            Scenario::DistributedBruteForce,
            Scenario::RefreshRateLimit,
            Scenario::InvalidRefreshToken,
        ]
    }

    /// Parse from scenario number
    pub fn from_number(n: u8) -> Option<Scenario> {
        Scenario::all().into_iter().find(|s| s.number() == n)
    }

    /// All scenarios in a category (case-insensitive)
    pub fn in_category(category: &str) -> Vec<Scenario> {
        Scenario::all()
            .into_iter()
            .filter(|s| s.category().eq_ignore_ascii_case(category))
            .collect()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl ScenarioStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            ScenarioStatus::Pass => "✓",
            ScenarioStatus::Fail => "✗",
            ScenarioStatus::Skip => "○",
            ScenarioStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScenarioStatus::Pass)
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioStatus::Pass => write!(f, "PASS"),
            ScenarioStatus::Fail => write!(f, "FAIL"),
            ScenarioStatus::Skip => write!(f, "SKIP"),
            ScenarioStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
}

impl ScenarioResult {
    pub fn pass(scenario: Scenario, duration_ms: u64) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Pass,
            duration_ms,
            message: None,
        }
    }

    pub fn fail(scenario: Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Fail,
            duration_ms,
            message: Some(message.into()),
        }
    }

    pub fn skip(scenario: Scenario, reason: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Skip,
            duration_ms: 0,
            message: Some(reason.into()),
        }
    }

    pub fn error(scenario: Scenario, error: impl Into<String>) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::Error,
            duration_ms: 0,
            message: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.scenario,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of a full probe run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub gateway: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    pub fn new(gateway: impl Into<String>, results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Pass)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Fail)
            .count();
        let skipped = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Skip)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            gateway: gateway.into(),
            total,
            passed,
            failed,
            skipped,
            errors,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// True when no scenario failed or errored (skips do not count against)
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Security probe - {}", self.gateway)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            self.total, self.passed, self.failed, self.skipped, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_numbers() {
        assert_eq!(Scenario::SqlInjectionGoogle.number(), 1);
        assert_eq!(Scenario::InvalidRefreshToken.number(), 24);
    }

    #[test]
    fn test_scenario_from_number() {
        assert_eq!(Scenario::from_number(1), Some(Scenario::SqlInjectionGoogle));
        assert_eq!(Scenario::from_number(10), Some(Scenario::NoneAlgorithm));
        assert_eq!(Scenario::from_number(25), None);
    }

    #[test]
    fn test_all_scenarios() {
        let all = Scenario::all();
        assert_eq!(all.len(), 24);

        // Numbers must be dense and unique
        let mut numbers: Vec<u8> = all.iter().map(|s| s.number()).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=24).collect::<Vec<u8>>());
    }

    #[test]
    fn test_category_lookup() {
        let jwt = Scenario::in_category("jwt");
        assert_eq!(jwt.len(), 8);
        assert!(jwt.contains(&Scenario::NoneAlgorithm));

        let abuse = Scenario::in_category("Abuse");
        assert_eq!(abuse.len(), 7);
    }

    #[test]
    fn test_result_creation() {
        let result = ScenarioResult::pass(Scenario::MissingToken, 100);
        assert!(result.status.is_success());
        assert_eq!(result.duration_ms, 100);
    }

    #[test]
    fn test_run_summary() {
        let results = vec![
            ScenarioResult::pass(Scenario::MissingToken, 100),
            ScenarioResult::fail(Scenario::EmptyToken, 50, "Empty token accepted"),
            ScenarioResult::skip(Scenario::ExpiredToken, "No fixture available"),
        ];

        let summary = RunSummary::new("http://localhost:8080", results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(!summary.is_clean());
    }
}
