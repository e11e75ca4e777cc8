//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::CopywriterClient;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    copywriter: Option<CopywriterClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The copywriter client is only constructed when the configuration
    /// carries credentials for it; without one the AI routes return 503.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let copywriter = config.copywriter().map(CopywriterClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                copywriter,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the copywriter client, if configured.
    #[must_use]
    pub fn copywriter(&self) -> Option<&CopywriterClient> {
        self.inner.copywriter.as_ref()
    }
}
