//! Route handlers organized by function

use std::future::Future;
use std::time::Duration;

use crate::db::DbError;
use crate::http::error::{ApiError, Operation};

pub mod health;
pub mod hello;
pub mod projects;
pub mod users;

/// Bound a store call by the request deadline.
///
/// On expiry the store future is dropped, which releases its connection
/// and rolls back any open transaction.
pub(crate) async fn with_deadline<T, F>(limit: Duration, fut: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, DbError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or(Err(DbError::Timeout(limit)))
}

/// Await store readiness, then run `work` under the request deadline.
///
/// Pool bring-up stays outside the deadline so a slow cold start is
/// reported as a connection failure rather than a query timeout.
pub(crate) async fn run_store<T, R, F>(
    op: Operation,
    limit: Duration,
    ready: R,
    work: F,
) -> Result<T, ApiError>
where
    R: Future<Output = Result<(), DbError>>,
    F: Future<Output = Result<T, DbError>>,
{
    ready.await.map_err(|e| ApiError::database(op, e))?;
    with_deadline(limit, work)
        .await
        .map_err(|e| ApiError::database(op, e))
}

/// Fallback for unknown paths
pub(crate) async fn not_found() -> ApiError {
    ApiError::UnknownRoute
}
