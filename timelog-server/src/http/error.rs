//! API error types with IntoResponse
//!
//! Errors are converted to envelope responses with appropriate status codes.
//! Database failures are logged with full detail; the caller only ever sees
//! a fixed message per operation.

use std::fmt;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use super::envelope::Reply;
use crate::db::{DbError, TxStage};
use crate::models::ValidationError;

/// Handler operation, used to pick the public failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetUser,
    CreateUser,
    UpdateUser,
    CreateProject,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::GetUser => "Failed to retrieve user",
            Self::CreateUser => "Failed to create user",
            Self::UpdateUser => "Failed to update user",
            Self::CreateProject => "Failed to create project",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GetUser => "get_user",
            Self::CreateUser => "create_user",
            Self::UpdateUser => "update_user",
            Self::CreateProject => "create_project",
        })
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// No route for the path (404)
    UnknownRoute,

    /// Method not served by this function (405); `allow` lists the served ones
    MethodNotAllowed { allow: &'static str },

    /// Declared but unbuilt feature (501)
    NotImplemented { feature: &'static str },

    /// Database failure (500, logged)
    Database { op: Operation, source: DbError },
}

impl ApiError {
    /// Classify a store error for `op`.
    pub fn database(op: Operation, e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::NotFound {
                resource: display_resource(resource),
            },
            source => Self::Database { op, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::UnknownRoute => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the envelope; never carries driver or DSN detail
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::UnknownRoute => "Not found".to_owned(),
            Self::MethodNotAllowed { .. } => "Method not allowed".to_owned(),
            Self::NotImplemented { feature } => format!("{} is not implemented", feature),
            Self::Database { op, source } => match source {
                DbError::Pool(_) | DbError::Acquire(_) => "Database connection failed".to_owned(),
                DbError::Transaction {
                    stage: TxStage::Begin,
                    ..
                } => "Transaction failed".to_owned(),
                DbError::Transaction {
                    stage: TxStage::Commit,
                    ..
                } => "Failed to save user".to_owned(),
                _ => op.failure_message().to_owned(),
            },
        }
    }
}

fn display_resource(resource: &'static str) -> &'static str {
    match resource {
        "user" => "User",
        "project" => "Project",
        other => other,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database {
                op,
                source: source @ DbError::Transaction {
                    stage: TxStage::Commit,
                    ..
                },
            } => {
                // The insert may have landed; the caller gets an ambiguous 500
                tracing::error!(operation = %op, error = %source, "Commit failed, outcome unknown");
            }
            Self::Database { op, source } => {
                tracing::error!(operation = %op, error = %source, "Database error");
            }
            Self::Validation(ValidationError::MalformedBody { reason }) => {
                tracing::debug!(reason = %reason, "Rejected request body");
            }
            _ => {}
        }

        let mut response = Reply::failure(self.status(), self.public_message()).into_response();
        if let Self::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
