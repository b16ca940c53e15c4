//! HTTP server command
//!
//! Runs the function host locally or in a container. The database pool is
//! not opened here: the first request that needs it pays the cold start.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use timelog_server::http::server::DEFAULT_PORT;
use timelog_server::{run_server, AppState, DbConfig, ServerConfig, SharedPool};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "BACKEND_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Listen on 127.0.0.1 only (avoids exposing a local run)
    #[arg(long, env = "LOCAL_ONLY")]
    pub local_only: bool,

    /// Explicit bind address, overrides --port and --local-only
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        match self.bind {
            Some(bind_addr) => ServerConfig { bind_addr },
            None => ServerConfig::for_port(self.port, self.local_only),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = DbConfig::from_env().context("Invalid database configuration")?;
    tracing::debug!(?db_config, "Database configuration loaded");

    let query_timeout = db_config.query_timeout;
    let pool = Arc::new(SharedPool::postgres(db_config));
    let state = AppState::postgres(Arc::clone(&pool), query_timeout);

    let config = args.server_config();
    tracing::info!("Starting timelog server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    // Best effort: the host may kill the process before we get here
    if let Some(pool) = pool.get_if_ready() {
        pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    Ok(())
}
