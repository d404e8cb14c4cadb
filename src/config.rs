use anyhow::Context;
use serde::Deserialize;

/// Process configuration, read once at startup and passed around through
/// [`crate::state::AppState`]. `SECRET_KEY` feeds both the session cookie
/// signing key and the password KDF salt.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL is required")?,
            secret_key: std::env::var("SECRET_KEY").context("SECRET_KEY is required")?,
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
        })
    }
}
