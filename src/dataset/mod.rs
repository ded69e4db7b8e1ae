//! Attack payload datasets
//!
//! Read-only collections of attack payloads and JWT fixtures, loaded once at
//! suite start. Built-in defaults cover runs without a fixture directory;
//! pre-provisioned tokens (expired, valid, tampered) only exist when a
//! fixture file supplies them, and the scenarios that need them skip
//! otherwise.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Credentials dataset file name
pub const CREDENTIALS_FILE: &str = "credentials_test_data.json";

/// JWT fixture file name
pub const JWT_FILE: &str = "jwt_test_data.json";

/// One injection payload used verbatim as a credential
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InjectionPayload {
    pub token: String,
    #[serde(default)]
    pub description: String,
}

impl InjectionPayload {
    pub fn new(token: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            description: description.into(),
        }
    }
}

/// Injection payloads keyed by attack category
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialsData {
    pub sql_injections: Vec<InjectionPayload>,
    pub xss_payloads: Vec<String>,
}

/// A pre-provisioned token fixture
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenFixture {
    pub jwt: String,
}

/// Tampering fixtures keyed by tampering kind
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TamperingFixture {
    pub invalid_signature_token: String,
}

/// JWT fixtures keyed by scenario name
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JwtFixtures {
    #[serde(default)]
    pub expired_token: Option<TokenFixture>,
    #[serde(default)]
    pub valid_token: Option<TokenFixture>,
    #[serde(default)]
    pub jwt_tampering: Option<TamperingFixture>,
}

/// All externally loaded test data, immutable for the duration of a run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestDataset {
    pub credentials: CredentialsData,
    pub jwt: JwtFixtures,
}

impl TestDataset {
    /// Built-in payload set used when no fixture directory is given.
    ///
    /// JWT fixtures stay empty here; the scenarios that require
    /// pre-provisioned tokens skip without them.
    pub fn builtin() -> Self {
        Self {
            credentials: CredentialsData {
                sql_injections: vec![
                    InjectionPayload::new("' OR '1'='1", "classic tautology"),
                    InjectionPayload::new("'; DROP TABLE users; --", "statement termination"),
                    InjectionPayload::new("' UNION SELECT * FROM users --", "union select"),
                    InjectionPayload::new("admin'--", "comment truncation"),
                    InjectionPayload::new("1' OR '1'='1' -- -", "numeric tautology"),
                ],
                xss_payloads: vec![
                    "<script>alert(1)</script>".to_string(),
                    "<img src=x onerror=alert(1)>".to_string(),
                    "\"><script>alert(document.cookie)</script>".to_string(),
                    "javascript:alert(1)".to_string(),
                ],
            },
            jwt: JwtFixtures::default(),
        }
    }

    /// Load datasets from a fixture directory.
    ///
    /// A missing credentials file falls back to the built-in payloads; a
    /// missing JWT file leaves the fixtures empty. An unreadable or
    /// unparseable file is an error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let credentials_path = dir.join(CREDENTIALS_FILE);
        let credentials = if credentials_path.exists() {
            let content = std::fs::read_to_string(&credentials_path)
                .with_context(|| format!("Failed to read {}", credentials_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", credentials_path.display()))?
        } else {
            info!(
                "No {} in {}, using built-in payloads",
                CREDENTIALS_FILE,
                dir.display()
            );
            Self::builtin().credentials
        };

        let jwt_path = dir.join(JWT_FILE);
        let jwt = if jwt_path.exists() {
            let content = std::fs::read_to_string(&jwt_path)
                .with_context(|| format!("Failed to read {}", jwt_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", jwt_path.display()))?
        } else {
            info!(
                "No {} in {}, JWT fixture scenarios will be skipped",
                JWT_FILE,
                dir.display()
            );
            JwtFixtures::default()
        };

        Ok(Self { credentials, jwt })
    }

    /// Load from an optional fixture directory, defaulting to the built-ins
    pub fn load_or_builtin(dir: Option<impl AsRef<Path>>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_payloads() {
        let dataset = TestDataset::builtin();
        assert!(!dataset.credentials.sql_injections.is_empty());
        assert!(!dataset.credentials.xss_payloads.is_empty());
        assert!(dataset
            .credentials
            .sql_injections
            .iter()
            .any(|p| p.token == "' OR '1'='1"));
        assert!(dataset.jwt.expired_token.is_none());
        assert!(dataset.jwt.valid_token.is_none());
    }

    #[test]
    fn test_load_missing_dir_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = TestDataset::load(dir.path()).unwrap();
        assert_eq!(
            dataset.credentials.sql_injections.len(),
            TestDataset::builtin().credentials.sql_injections.len()
        );
        assert!(dataset.jwt.jwt_tampering.is_none());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(
            dir.path().join(CREDENTIALS_FILE),
            r#"{
                "sql_injections": [{"token": "' OR 1=1 --", "description": "short"}],
                "xss_payloads": ["<svg onload=alert(1)>"]
            }"#,
        )
        .unwrap();

        std::fs::write(
            dir.path().join(JWT_FILE),
            r#"{
                "expired_token": {"jwt": "aaa.bbb.ccc"},
                "jwt_tampering": {"invalid_signature_token": "aaa.bbb.bad"}
            }"#,
        )
        .unwrap();

        let dataset = TestDataset::load(dir.path()).unwrap();
        assert_eq!(dataset.credentials.sql_injections.len(), 1);
        assert_eq!(dataset.credentials.xss_payloads[0], "<svg onload=alert(1)>");
        assert_eq!(dataset.jwt.expired_token.unwrap().jwt, "aaa.bbb.ccc");
        assert!(dataset.jwt.valid_token.is_none());
        assert_eq!(
            dataset.jwt.jwt_tampering.unwrap().invalid_signature_token,
            "aaa.bbb.bad"
        );
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CREDENTIALS_FILE), "not json").unwrap();
        assert!(TestDataset::load(dir.path()).is_err());
    }
}
