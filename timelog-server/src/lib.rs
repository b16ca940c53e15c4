//! timelog-server: HTTP function endpoints over a lazily built Postgres pool
//!
//! The pool is created on the first request that needs it (cold start),
//! shared by every later request in the process, and handed to handlers
//! through injected store traits.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DbConfig, Dsn, PoolSettings};
pub use db::{DbError, LazyPool, PoolError, SharedPool};
pub use http::{build_router, run_server, AppState, ServerConfig};
