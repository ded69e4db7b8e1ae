//! Configuration module
//!
//! Immutable probe configuration built once at suite start.

#![allow(dead_code)]

mod env;

pub use env::{print_env_help, EnvBuilder, EnvConfig, EnvGuard};

use std::collections::HashMap;

/// Gateway endpoint paths
pub mod endpoints {
    pub const AUTH_STATUS: &str = "/auth/status";
    pub const AUTH_GOOGLE: &str = "/auth/google";
    pub const AUTH_APPLE: &str = "/auth/apple";
    pub const AUTH_REFRESH: &str = "/auth/refresh";
    pub const AUTH_REVOKE: &str = "/auth/revoke";
    pub const PROFILE: &str = "/api/profile";
    pub const STORIES: &str = "/api/stories";
    pub const USER_PREFERENCES: &str = "/api/user/preferences";

    /// Endpoints that must reject unauthenticated requests
    pub const PROTECTED: [&str; 3] = [PROFILE, STORIES, USER_PREFERENCES];
}

/// Fixed synthetic client identity sent on every request.
///
/// The base set is never mutated; per-request additions go through
/// [`ClientHeaderSet::merged`].
#[derive(Clone, Debug)]
pub struct ClientHeaderSet {
    base: HashMap<String, String>,
}

impl ClientHeaderSet {
    pub fn new() -> Self {
        let mut base = HashMap::new();
        base.insert("X-Client-Platform".to_string(), "ios".to_string());
        base.insert("X-Client-Version".to_string(), "1.0.0".to_string());
        base.insert(
            "X-Device-ID".to_string(),
            "test-device-id-12345".to_string(),
        );
        base.insert("Content-Type".to_string(), "application/json".to_string());
        Self { base }
    }

    /// Copy the base set and merge custom headers on top
    pub fn merged(&self, custom: Option<&HashMap<String, String>>) -> HashMap<String, String> {
        let mut headers = self.base.clone();
        if let Some(custom) = custom {
            for (key, value) in custom {
                headers.insert(key.clone(), value.clone());
            }
        }
        headers
    }

    pub fn base(&self) -> &HashMap<String, String> {
        &self.base
    }
}

impl Default for ClientHeaderSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide immutable probe configuration
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// Gateway base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Synthetic client identity headers
    pub headers: ClientHeaderSet,

    /// Burst size against auth endpoints
    pub auth_burst: usize,

    /// Burst size against API endpoints
    pub api_burst: usize,

    /// Maximum brute-force attempts before giving up
    pub brute_force_attempts: usize,

    /// Rate-limit window cool-down in seconds
    pub cooldown_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            headers: ClientHeaderSet::new(),
            auth_burst: 15,
            api_burst: 70,
            brute_force_attempts: 20,
            cooldown_secs: 65,
        }
    }
}

impl ProbeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_cooldown(mut self, secs: u64) -> Self {
        self.cooldown_secs = secs;
        self
    }

    /// Build configuration from environment overrides
    pub fn from_env(env: &EnvConfig) -> Self {
        let mut config = Self::default();
        if let Some(url) = &env.base_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = env.timeout {
            config.timeout_secs = timeout;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.auth_burst, 15);
        assert_eq!(config.api_burst, 70);
        assert_eq!(config.cooldown_secs, 65);
    }

    #[test]
    fn test_header_set_base() {
        let headers = ClientHeaderSet::new();
        assert_eq!(
            headers.base().get("X-Client-Platform"),
            Some(&"ios".to_string())
        );
        assert_eq!(headers.base().len(), 4);
    }

    #[test]
    fn test_header_merge_does_not_mutate_base() {
        let headers = ClientHeaderSet::new();

        let mut custom = HashMap::new();
        custom.insert("Authorization".to_string(), "Bearer abc".to_string());
        custom.insert("X-Client-Platform".to_string(), "android".to_string());

        let merged = headers.merged(Some(&custom));
        assert_eq!(merged.get("Authorization"), Some(&"Bearer abc".to_string()));
        assert_eq!(
            merged.get("X-Client-Platform"),
            Some(&"android".to_string())
        );

        // Base set stays intact
        assert_eq!(
            headers.base().get("X-Client-Platform"),
            Some(&"ios".to_string())
        );
        assert!(headers.base().get("Authorization").is_none());
    }

    #[test]
    fn test_protected_endpoints() {
        assert_eq!(endpoints::PROTECTED.len(), 3);
        assert!(endpoints::PROTECTED.contains(&endpoints::PROFILE));
    }
}
