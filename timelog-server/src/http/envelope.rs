//! Response envelope
//!
//! Every JSON body has the shape `{success, data?, error?}`. Exactly one of
//! `data` / `error` is present.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Uniform response wrapper
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Status code paired with an envelope, encoded once as `application/json`
#[derive(Debug)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub envelope: Envelope<T>,
}

impl<T> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            status,
            envelope: Envelope::success(data),
        }
    }
}

impl Reply<()> {
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope: Envelope::failure(message),
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
