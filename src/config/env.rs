//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix for probe settings
const ENV_PREFIX: &str = "GATEWAY_PROBE";

/// Base URL variable, shared with the original test fixtures
const BASE_URL_VAR: &str = "GATEWAY_BASE_URL";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Gateway base URL from GATEWAY_BASE_URL
    pub base_url: Option<String>,
    /// Timeout from GATEWAY_PROBE_TIMEOUT
    pub timeout: Option<u64>,
    /// Output format from GATEWAY_PROBE_FORMAT
    pub format: Option<String>,
    /// Fixture directory from GATEWAY_PROBE_DATA_DIR
    pub data_dir: Option<String>,
    /// Verbose from GATEWAY_PROBE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: env::var(BASE_URL_VAR).ok(),
            timeout: get_env_parse("TIMEOUT"),
            format: get_env("FORMAT"),
            data_dir: get_env("DATA_DIR"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.timeout.is_some()
            || self.format.is_some()
            || self.data_dir.is_some()
            || self.verbose.is_some()
    }

    /// Get base URL with fallback
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// Get timeout with fallback
    pub fn timeout_or(&self, default: u64) -> u64 {
        self.timeout.unwrap_or(default)
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    /// Create a new environment builder
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set gateway base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.vars.push((BASE_URL_VAR.to_string(), url.into()));
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TIMEOUT"), timeout.to_string()));
        self
    }

    /// Set output format
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_FORMAT"), format.into()));
        self
    }

    /// Set fixture directory
    pub fn data_dir(mut self, dir: impl Into<String>) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_DATA_DIR"), dir.into()));
        self
    }

    /// Set verbose
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_VERBOSE"), verbose.to_string()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all recognized environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {BASE_URL_VAR}        Gateway base URL (default http://localhost:8080)");
    println!("  {ENV_PREFIX}_TIMEOUT   Request timeout in seconds");
    println!("  {ENV_PREFIX}_FORMAT    Output format (table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_DATA_DIR  Directory with attack payload fixtures");
    println!("  {ENV_PREFIX}_VERBOSE   Enable verbose output (true/false)");
    println!();
    println!("Example:");
    println!("  export {BASE_URL_VAR}=https://staging.example.com");
    println!("  gateway-probe scan");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_config_fallback() {
        let config = EnvConfig::default();
        assert_eq!(config.base_url_or("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(config.timeout_or(10), 10);
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new()
            .base_url("http://10.0.0.1:8080")
            .timeout(20)
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.base_url, Some("http://10.0.0.1:8080".to_string()));
        assert_eq!(config.timeout, Some(20));
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = EnvBuilder::new().verbose(true).apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.verbose, Some(true));
    }
}
