//! Store traits injected into the HTTP handlers
//!
//! The Postgres repositories implement these; tests swap in in-memory
//! fakes so handlers can be exercised without a database.

use async_trait::async_trait;

use super::error::DbError;
use super::repos::User;
use crate::models::{NewUser, UserId, UserUpdate};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Bring up the backing pool if it is not up yet.
    ///
    /// Handlers await this outside the request deadline: a cold start is
    /// bounded by the pool's own connect and probe timeouts.
    async fn ready(&self) -> Result<(), DbError> {
        Ok(())
    }

    /// Fetch one user; a missing row is [`DbError::NotFound`].
    async fn get_user(&self, id: UserId) -> Result<User, DbError>;

    /// Insert inside a transaction and return the stored row.
    async fn create_user(&self, new_user: NewUser) -> Result<User, DbError>;

    /// Overwrite name and email, returning the number of rows affected.
    async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<u64, DbError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// See [`UserStore::ready`].
    async fn ready(&self) -> Result<(), DbError> {
        Ok(())
    }

    /// Check a connection out and hand it back.
    ///
    /// Nothing is written: project storage has no schema yet, so the
    /// caller answers "not implemented" once this succeeds.
    async fn create_project(&self) -> Result<(), DbError>;
}
