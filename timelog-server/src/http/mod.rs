//! HTTP layer
//!
//! Axum server with:
//! - One route per function (hello-world, create-project, users)
//! - Uniform JSON envelope for every JSON body
//! - Request tracing and graceful shutdown

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::{Envelope, Reply};
pub use error::{ApiError, Operation};
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
