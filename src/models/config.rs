//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::repository::cache;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cache_capacity() -> usize {
    cache::DEFAULT_CAPACITY
}

fn default_cache_ttl_secs() -> u64 {
    cache::DEFAULT_TTL.as_secs()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the vehicle backend (`APP_API_URL`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub templates_dir: String,
    /// Signing key for flash message cookies, at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Lists and vehicles each kept in the query cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

/// `APP_*` variables, e.g. `APP_API_URL`. Empty values are skipped so a
/// blank line in `.env` never overrides the YAML files.
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("APP").ignore_empty(true)
}

#[cfg(test)]
mod tests {
    use config::{Config, Map};

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Config {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Config::builder()
            .set_default("address", "127.0.0.1")
            .and_then(|b| b.set_default("port", 8080))
            .and_then(|b| b.set_default("templates_dir", "templates/**/*"))
            .and_then(|b| b.set_default("secret", "from-yaml"))
            .unwrap()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
    }

    #[test]
    fn blank_variable_keeps_file_value() {
        let config: ServerConfig = settings(&[("APP_SECRET", "")]).try_deserialize().unwrap();

        assert_eq!(config.secret, "from-yaml");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.cache_capacity, cache::DEFAULT_CAPACITY);
        assert_eq!(config.cache_ttl_secs, 300);
    }

    #[test]
    fn variable_overrides_file_value() {
        let config: ServerConfig = settings(&[("APP_API_URL", "http://backend:9000")])
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api_url, "http://backend:9000");
    }
}
