use std::env;
use std::str::FromStr;
use anyhow::{anyhow, Context, Result};

use crate::utils::SignatureFormat;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub rust_log: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Signed requests
    pub request_secret: String,
    pub signature_format: SignatureFormat,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgresql://{}:{}@{}:{}/{}",
                get_env_or_default("POSTGRES_USER", "postgres"),
                get_env_or_default("POSTGRES_PASSWORD", ""),
                get_env_or_default("POSTGRES_HOST", "localhost"),
                get_env_or_default("POSTGRES_PORT", "5432"),
                get_env_or_default("POSTGRES_DB", "scoreboard")
            )
        });

        let signature_format = get_env_or_default("SIGNATURE_FORMAT", "raw")
            .parse::<SignatureFormat>()
            .map_err(|e| anyhow!("SIGNATURE_FORMAT must be `raw` or `hex`: {}", e))?;

        let port: u16 = parse_number("PORT", &get_env_or_default("PORT", "8080"))?;
        let database_max_connections: u32 = parse_number(
            "DATABASE_MAX_CONNECTIONS",
            &get_env_or_default("DATABASE_MAX_CONNECTIONS", "10"),
        )?;

        Ok(Self {
            // Server
            port,
            rust_log: get_env_or_default("RUST_LOG", "info"),

            // Database
            database_url,
            database_max_connections,

            // Signed requests
            request_secret: get_env("REQUEST_SECRET").context("REQUEST_SECRET is required")?,
            signature_format,

            // CORS
            cors_allowed_origins: get_env_or_default(
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000,http://localhost:8080",
            ),
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing environment variable: {}", key))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{} must be a number, got {:?}", key, raw))
}

#[cfg(test)]
mod tests {
    use super::parse_number;

    #[test]
    fn test_parse_number_accepts_valid_values() {
        assert_eq!(parse_number::<u16>("PORT", "8080").expect("port"), 8080);
        assert_eq!(parse_number::<u32>("DATABASE_MAX_CONNECTIONS", " 25 ").expect("max"), 25);
    }

    #[test]
    fn test_parse_number_rejects_invalid_values() {
        let err = parse_number::<u16>("PORT", "80a0").expect_err("garbage port");
        assert!(err.to_string().contains("PORT must be a number"));

        assert!(parse_number::<u16>("PORT", "70000").is_err());
        assert!(parse_number::<u32>("DATABASE_MAX_CONNECTIONS", "-1").is_err());
    }
}
