//! User repository
//!
//! - get: single SELECT by id
//! - create: INSERT ... RETURNING inside a transaction
//! - update: single UPDATE, caller interprets the affected row count

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::db::error::{DbError, TxStage};
use crate::db::lazy::SharedPool;
use crate::db::store::UserStore;
use crate::models::{NewUser, UserId, UserUpdate};

pub(crate) const GET_USER_SQL: &str =
    "SELECT id, email, name, created_at FROM users WHERE id = $1";

pub(crate) const CREATE_USER_SQL: &str = "INSERT INTO users (email, name, created_at) \
     VALUES ($1, $2, $3) \
     RETURNING id, email, name, created_at";

pub(crate) const UPDATE_USER_SQL: &str = "UPDATE users SET name = $1, email = $2 WHERE id = $3";

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User repository backed by the shared lazy pool
#[derive(Clone)]
pub struct UserRepo {
    pool: Arc<SharedPool>,
}

impl UserRepo {
    pub fn new(pool: Arc<SharedPool>) -> Self {
        Self { pool }
    }

    async fn pool(&self) -> Result<PgPool, DbError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn ready(&self) -> Result<(), DbError> {
        self.pool().await.map(drop)
    }

    async fn get_user(&self, id: UserId) -> Result<User, DbError> {
        let pool = self.pool().await?;

        sqlx::query_as::<_, User>(GET_USER_SQL)
            .bind(id.get())
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            })
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DbError> {
        let pool = self.pool().await?;

        // Dropping `tx` without commit rolls it back, so every early return below is safe
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DbError::transaction(TxStage::Begin, e))?;

        let user = sqlx::query_as::<_, User>(CREATE_USER_SQL)
            .bind(new_user.email.as_str())
            .bind(new_user.name.as_str())
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::transaction(TxStage::Commit, e))?;

        tracing::debug!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<u64, DbError> {
        let pool = self.pool().await?;

        let result = sqlx::query(UPDATE_USER_SQL)
            .bind(update.name.as_str())
            .bind(update.email.as_str())
            .bind(id.get())
            .execute(&pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;

    // Integration tests - run with DATABASE_URL set against a database that has
    // users(id BIGINT GENERATED ALWAYS AS IDENTITY, email TEXT, name TEXT, created_at TIMESTAMPTZ)
    // cargo test -p timelog-server -- --ignored

    fn repo() -> UserRepo {
        let config = DbConfig::from_env().expect("config");
        UserRepo::new(Arc::new(SharedPool::postgres(config)))
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trip() {
        let repo = repo();
        let created = repo
            .create_user(NewUser::new(Some("ann@example.com"), Some("Ann")).unwrap())
            .await
            .expect("create failed");

        let fetched = repo
            .get_user(UserId::new(created.id).unwrap())
            .await
            .expect("get failed");

        assert_eq!(fetched.email, "ann@example.com");
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_user_is_not_found() {
        let err = repo()
            .get_user(UserId::new(i64::MAX).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_user_affects_no_rows() {
        let rows = repo()
            .update_user(
                UserId::new(i64::MAX).unwrap(),
                UserUpdate::new(Some("Nobody"), Some("nobody@example.com")).unwrap(),
            )
            .await
            .expect("update failed");
        assert_eq!(rows, 0);
    }
}
