//! Create-project function
//!
//! Exercises the pool checkout; the project itself is not stored yet, so a
//! healthy connection answers 501.

use std::sync::Arc;

use axum::{extract::State, routing::post, Router};

use super::run_store;
use crate::http::error::{ApiError, Operation};
use crate::http::server::AppState;

/// POST /create-project
async fn create_project(State(state): State<Arc<AppState>>) -> ApiError {
    let checkout = run_store(
        Operation::CreateProject,
        state.query_timeout,
        state.projects.ready(),
        state.projects.create_project(),
    )
    .await;

    match checkout {
        Ok(()) => ApiError::NotImplemented {
            feature: "Project creation",
        },
        Err(e) => e,
    }
}

/// Project routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/create-project",
        post(create_project).fallback(|| async { ApiError::MethodNotAllowed { allow: "POST" } }),
    )
}
