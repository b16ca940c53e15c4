//! timelog - function host for the timelog backend
//!
//! - `serve`: run the HTTP functions (hello-world, create-project, users)
//! - `check`: resolve the database DSN and probe the pool

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod commands;
mod env;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "timelog",
    author,
    version,
    about = "Serverless-style HTTP functions backed by a lazily opened Postgres pool"
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP function host
    Serve(commands::serve::ServeArgs),
    /// Check database configuration and connectivity
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so .env values can feed clap's env fallbacks
    let loaded_from = env::load_dotenv();
    let cli = Cli::parse();

    // Logging is best effort; the command still runs without it
    if let Err(e) = tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    }) {
        eprintln!("tracing setup failed: {e:#}");
    }

    if loaded_from.is_empty() {
        info!("Using environment variables only (no .env file found)");
    } else {
        for path in &loaded_from {
            info!("Loaded configuration from {}", path.display());
        }
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Check(args) => commands::run_check(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
