//! Central module for application-wide configuration settings.
//!
//! This module handles loading the parameters the service needs at startup:
//! the database location, pool sizing, the token signing secret and lifetime,
//! and the port to listen on.

use anyhow::{Context, Result, ensure};
use std::env;
use std::fmt;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub server_port: u16,
}

/// Longest token lifetime accepted: ten years.
pub const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Required keys must
    /// be present, numbers must parse, and the token settings must be usable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{} not set", key));
        let or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let database_url = required("DATABASE_URL")?;

        let max_connections = or_default("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = or_default("DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = required("JWT_SECRET")?;
        ensure!(!jwt_secret.is_empty(), "JWT_SECRET must not be empty");

        let jwt_expires_in_seconds = or_default("JWT_EXPIRES_IN_SECONDS", "86400")
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
        ensure!(
            (1..=MAX_JWT_EXPIRES_IN_SECONDS).contains(&jwt_expires_in_seconds),
            "JWT_EXPIRES_IN_SECONDS must be between 1 and {}",
            MAX_JWT_EXPIRES_IN_SECONDS
        );

        let server_port = or_default("SERVER_PORT", "3000")
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            server_port,
        })
    }
}

// The signing secret must never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expires_in_seconds", &self.jwt_expires_in_seconds)
            .field("server_port", &self.server_port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const BASE: [(&str, &str); 2] = [("DATABASE_URL", "sqlite::memory:"), ("JWT_SECRET", "s3cret")];

    fn with(extra: (&'static str, &'static str)) -> Vec<(&'static str, &'static str)> {
        let mut vars: Vec<_> = BASE.iter().copied().filter(|(key, _)| *key != extra.0).collect();
        vars.push(extra);
        vars
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&BASE).unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 3);
        assert_eq!(config.jwt_expires_in_seconds, 86400);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_overrides_applied() {
        let mut vars = with(("SERVER_PORT", "8080"));
        vars.push(("JWT_EXPIRES_IN_SECONDS", "60"));

        let config = load(&vars).unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.jwt_expires_in_seconds, 60);
    }

    #[test]
    fn test_missing_database_url_rejected() {
        let error = load(&[("JWT_SECRET", "s3cret")]).unwrap_err();
        assert!(error.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_missing_secret_rejected() {
        let error = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap_err();
        assert!(error.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let error = load(&with(("JWT_SECRET", ""))).unwrap_err();
        assert!(error.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_non_numeric_port_rejected() {
        let error = load(&with(("SERVER_PORT", "http"))).unwrap_err();
        assert!(error.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_token_lifetime_bounds() {
        for value in ["0", "315360001", "100000000000000000", "18446744073709551615"] {
            let error = load(&with(("JWT_EXPIRES_IN_SECONDS", value))).unwrap_err();
            assert!(
                error.to_string().contains("JWT_EXPIRES_IN_SECONDS"),
                "value {}",
                value
            );
        }

        let config = load(&with(("JWT_EXPIRES_IN_SECONDS", "315360000"))).unwrap();
        assert_eq!(config.jwt_expires_in_seconds, MAX_JWT_EXPIRES_IN_SECONDS);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "super-secret-value".to_string(),
            jwt_expires_in_seconds: 60,
            server_port: 3000,
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
