//! Custom Axum extractors
//!
//! Rejections are [`ApiError`]s so malformed input still produces an
//! envelope body rather than axum's plain-text rejection.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{UserId, ValidationError};

/// JSON body; any read or parse failure is a 400 "Invalid request body"
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::MalformedBody {
                reason: e.body_text(),
            })
        })?;

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            ApiError::Validation(ValidationError::MalformedBody {
                reason: e.to_string(),
            })
        })
    }
}

#[derive(Deserialize)]
struct IdParams {
    id: Option<String>,
}

/// Extract and validate `?id=<n>` from the query string
pub struct ValidUserId(pub UserId);

impl<S> FromRequestParts<S> for ValidUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<IdParams>::try_from_uri(&parts.uri).map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "User ID",
                reason: "must be a positive integer",
            })
        })?;

        let id = UserId::parse(params.id.as_deref())?;
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    async fn user_id(uri: &str) -> Result<UserId, ApiError> {
        let (mut parts, _) = http::Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidUserId::from_request_parts(&mut parts, &())
            .await
            .map(|ValidUserId(id)| id)
    }

    #[tokio::test]
    async fn reads_id_from_query() {
        assert_eq!(user_id("/users?id=5").await.unwrap().get(), 5);
    }

    #[tokio::test]
    async fn missing_id_is_required_error() {
        let err = user_id("/users").await.unwrap_err();
        assert_eq!(err.public_message(), "User ID is required");

        let err = user_id("/users?id=").await.unwrap_err();
        assert_eq!(err.public_message(), "User ID is required");
    }

    #[tokio::test]
    async fn malformed_json_is_validation_error() {
        let req = http::Request::builder()
            .method("POST")
            .body(Body::from("{not json"))
            .unwrap();
        let err = JsonPayload::<serde_json::Value>::from_request(req, &())
            .await
            .err()
            .expect("should reject");
        assert_eq!(err.public_message(), "Invalid request body");
    }
}
