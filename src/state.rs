use std::sync::Arc;

use anyhow::Context;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    session_key: Key,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let session_key = derive_session_key(&config.secret_key);
        Self {
            db,
            config,
            session_key,
        }
    }
}

/// Stretch the configured secret into the 64 bytes the cookie key wants.
/// Instances sharing `SECRET_KEY` verify each other's session cookies.
pub(crate) fn derive_session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_stable_per_secret() {
        let a = derive_session_key("dev-secret");
        let b = derive_session_key("dev-secret");
        assert_eq!(a.master(), b.master());

        let c = derive_session_key("other-secret");
        assert_ne!(a.master(), c.master());
    }
}
