//! Server construction and startup sequencing.
//!
//! Startup is strictly ordered: connect to the database, apply pending
//! migrations, bind the signing key, then start listening. Any failure
//! before the listener binds aborts startup — the service never accepts
//! traffic against an unmigrated schema or without verified key material.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::extract::FromRef;
use axum::routing::get;
use sigil_auth::{AuthState, TokenVerifier};
use sigil_db_postgres::{PgPool, migrations, pool};
use tracing::info;

use crate::config::AppConfig;
use crate::handlers;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Bearer authentication state.
    pub auth: AuthState,
    /// Database connection pool.
    pub pool: PgPool,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// The Sigil HTTP server.
pub struct Server {
    config: AppConfig,
}

impl Server {
    /// Creates a server from validated configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Runs the startup sequence and serves until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable, a migration fails,
    /// the signing key is invalid, or the listen address cannot be bound.
    pub async fn run(self) -> anyhow::Result<()> {
        let pool = pool::create_pool(&self.config.database)
            .await
            .context("database connection failed")?;

        if self.config.database.run_migrations {
            migrations::run(&pool)
                .await
                .context("schema migration failed")?;
        }

        let secret = self
            .config
            .auth
            .secret_key()
            .context("invalid signing secret")?;
        let verifier = Arc::new(TokenVerifier::new(&secret));

        let state = AppState {
            auth: AuthState::new(verifier),
            pool,
        };
        let app = router(state);

        let addr = self.config.addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!(%addr, "Listening");

        axum::serve(listener, app)
            .await
            .context("server terminated")?;
        Ok(())
    }
}

/// Builds the application router.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/me", get(handlers::me))
        .with_state(state)
}
