//! Database connectivity check
//!
//! Resolves the DSN the server would use and, unless `--dsn-only` is given,
//! builds the pool once and runs the liveness probe.

use anyhow::{Context, Result};
use clap::Parser;

use timelog_server::db::init_pool;
use timelog_server::DbConfig;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Print the resolved DSN (password masked) without connecting
    #[arg(long)]
    pub dsn_only: bool,
}

pub async fn run_check(args: CheckArgs) -> Result<()> {
    let config = DbConfig::from_env().context("Invalid database configuration")?;
    let dsn = config.dsn().context("Cannot build database DSN")?;
    println!("dsn: {}", dsn);

    if args.dsn_only {
        return Ok(());
    }

    let pool = init_pool(&config)
        .await
        .context("Database check failed")?;
    println!(
        "ok: pool ready (max {}, min {})",
        config.pool.max_connections, config.pool.min_connections
    );
    pool.close().await;

    Ok(())
}
