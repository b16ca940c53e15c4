//! Project repository
//!
//! Project creation has no storage yet: the `projects` columns are not
//! settled. The repository checks a connection out of the pool and hands
//! it straight back so the connection path is exercised end to end.

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::error::DbError;
use crate::db::lazy::SharedPool;
use crate::db::store::ProjectStore;

#[derive(Clone)]
pub struct ProjectRepo {
    pool: Arc<SharedPool>,
}

impl ProjectRepo {
    pub fn new(pool: Arc<SharedPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepo {
    async fn ready(&self) -> Result<(), DbError> {
        self.pool.get().await?;
        Ok(())
    }

    async fn create_project(&self) -> Result<(), DbError> {
        let pool = self.pool.get().await?;

        tracing::debug!("Connecting to the db");
        let conn = pool.acquire().await.map_err(DbError::Acquire)?;
        tracing::info!("Connection checked out for project creation");
        drop(conn);

        Ok(())
    }
}
