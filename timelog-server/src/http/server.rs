//! Axum server setup
//!
//! Server skeleton with:
//! - Store injection through [`AppState`]
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{ProjectRepo, ProjectStore, SharedPool, UserRepo, UserStore};

/// Default listen port for the function host
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::for_port(DEFAULT_PORT, false)
    }
}

impl ServerConfig {
    /// Listen on all interfaces, or loopback only when `local_only` is set
    /// (keeps local runs from tripping firewall prompts).
    pub fn for_port(port: u16, local_only: bool) -> Self {
        let ip = if local_only {
            Ipv4Addr::LOCALHOST
        } else {
            Ipv4Addr::UNSPECIFIED
        };
        Self {
            bind_addr: SocketAddr::from((ip, port)),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub projects: Arc<dyn ProjectStore>,
    /// Deadline for each request's database work
    pub query_timeout: Duration,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        projects: Arc<dyn ProjectStore>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            users,
            projects,
            query_timeout,
        }
    }

    /// State backed by the Postgres repositories sharing one lazy pool
    pub fn postgres(pool: Arc<SharedPool>, query_timeout: Duration) -> Self {
        Self::new(
            Arc::new(UserRepo::new(Arc::clone(&pool))),
            Arc::new(ProjectRepo::new(pool)),
            query_timeout,
        )
    }
}

/// Build the router with every function mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::hello::router())
        .merge(routes::users::router())
        .merge(routes::projects::router())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = Arc::new(SharedPool::postgres(DbConfig::from_env()?));
/// let state = AppState::postgres(pool, Duration::from_secs(5));
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
