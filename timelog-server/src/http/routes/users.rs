//! User function - read, create and update by HTTP method

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use serde::{Deserialize, Serialize};

use super::run_store;
use crate::db::User;
use crate::http::envelope::Reply;
use crate::http::error::{ApiError, Operation};
use crate::http::extractors::{JsonPayload, ValidUserId};
use crate::http::server::AppState;
use crate::models::{NewUser, UserId, UserUpdate};

/// Request body shared by create and update
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// User response
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Update acknowledgement; the row is not re-read
#[derive(Serialize)]
pub struct UpdatedResponse {
    pub updated: bool,
    pub user_id: UserId,
}

/// GET /users?id=<n> - fetch one user
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Reply<UserResponse>, ApiError> {
    let user = run_store(
        Operation::GetUser,
        state.query_timeout,
        state.users.ready(),
        state.users.get_user(id),
    )
    .await?;

    Ok(Reply::ok(UserResponse::from(user)))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload<UserPayload>,
) -> Result<Reply<UserResponse>, ApiError> {
    let new_user = NewUser::new(payload.email.as_deref(), payload.name.as_deref())?;

    let user = run_store(
        Operation::CreateUser,
        state.query_timeout,
        state.users.ready(),
        state.users.create_user(new_user),
    )
    .await?;

    tracing::info!(user_id = user.id, "User created");
    Ok(Reply::created(UserResponse::from(user)))
}

/// PUT /users - overwrite name and email
async fn update_user(
    State(state): State<Arc<AppState>>,
    JsonPayload(payload): JsonPayload<UserPayload>,
) -> Result<Reply<UpdatedResponse>, ApiError> {
    // Checked before anything else so a bad id never reaches the store
    let id = UserId::new(payload.user_id.unwrap_or_default())?;
    let update = UserUpdate::new(payload.name.as_deref(), payload.email.as_deref())?;

    let rows = run_store(
        Operation::UpdateUser,
        state.query_timeout,
        state.users.ready(),
        state.users.update_user(id, update),
    )
    .await?;

    if rows == 0 {
        return Err(ApiError::NotFound { resource: "User" });
    }

    Ok(Reply::ok(UpdatedResponse {
        updated: true,
        user_id: id,
    }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users",
        get(get_user)
            .post(create_user)
            .put(update_user)
            .fallback(|| async {
                ApiError::MethodNotAllowed {
                    allow: "GET, POST, PUT",
                }
            }),
    )
}
