//! Service configuration.

use std::str::FromStr;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// PostgreSQL connection URL. When unset the service runs on an
    /// in-memory store that is lost on exit.
    pub database_url: Option<String>,

    /// Maximum pooled database connections (default: 10).
    pub db_max_connections: u32,

    /// Apply embedded migrations at startup (default: true).
    pub run_migrations: bool,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds. Expiry drops the in-flight store query.
    pub request_timeout_seconds: u64,

    /// Maximum concurrent requests on the subscription routes.
    pub max_concurrent_requests: usize,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            run_migrations: env_parse("RUN_MIGRATIONS").unwrap_or(defaults.run_migrations),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or(defaults.cors_origins),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            max_concurrent_requests: env_parse("MAX_CONCURRENT_REQUESTS")
                .unwrap_or(defaults.max_concurrent_requests),
        }
    }
}

/// Read and parse an environment variable, ignoring unparsable values.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_url: None,
            db_max_connections: 10,
            run_migrations: true,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            max_concurrent_requests: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_memory_store() {
        let config = ServiceConfig::default();
        assert!(config.database_url.is_none());
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert!(config.run_migrations);
    }

    #[test]
    fn origins_are_trimmed_and_split() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test ,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
