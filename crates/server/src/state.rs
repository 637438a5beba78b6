//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::CafeConfig;
use crate::services::{CredentialCheck, SharedSecret};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the credential check.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CafeConfig,
    pool: SqlitePool,
    credentials: Box<dyn CredentialCheck>,
}

impl AppState {
    /// Create a new application state that authorizes deletes with the
    /// configured shared API key.
    #[must_use]
    pub fn new(config: CafeConfig, pool: SqlitePool) -> Self {
        let credentials = SharedSecret::new(config.api_key.clone());
        Self::with_credentials(config, pool, credentials)
    }

    /// Create a new application state with a custom credential check.
    #[must_use]
    pub fn with_credentials(
        config: CafeConfig,
        pool: SqlitePool,
        credentials: impl CredentialCheck + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                credentials: Box::new(credentials),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &CafeConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the credential check guarding deletes.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialCheck {
        self.inner.credentials.as_ref()
    }
}
