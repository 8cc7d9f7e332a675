//! Service configuration loaded from environment variables.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid number, got '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Reads from environment variables:
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8080`)
/// - `PRODUCTS_BASE_URL`: Products service base (default: `"http://localhost:5259/api"`)
/// - `PRODUCTS_TIMEOUT_SECS`: outbound request timeout (default: `10`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub products_base_url: String,
    pub products_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = parse_or(&lookup, "PORT", 8080)?;
        let timeout_secs = parse_or(&lookup, "PRODUCTS_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            products_base_url: lookup("PRODUCTS_BASE_URL")
                .unwrap_or_else(|| "http://localhost:5259/api".to_string()),
            products_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&'static str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/orders")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.products_base_url, "http://localhost:5259/api");
        assert_eq!(config.products_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/orders"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("PRODUCTS_BASE_URL", "http://products:8080"),
            ("PRODUCTS_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.products_base_url, "http://products:8080");
        assert_eq!(config.products_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_database_url_required() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("DATABASE_URL", "postgres://db"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }
}
