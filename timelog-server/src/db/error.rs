//! Database error type shared by the stores

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::pool::PoolError;

/// Transaction step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Begin,
    Commit,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Begin => "begin",
            Self::Commit => "commit",
        })
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The lazy pool could not be built
    #[error("connection pool unavailable: {0}")]
    Pool(Arc<PoolError>),

    /// A connection could not be checked out of a live pool
    #[error("failed to acquire connection: {0}")]
    Acquire(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("failed to {stage} transaction: {source}")]
    Transaction {
        stage: TxStage,
        #[source]
        source: sqlx::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("database deadline of {0:?} exceeded")]
    Timeout(Duration),
}

impl DbError {
    pub fn transaction(stage: TxStage, source: sqlx::Error) -> Self {
        Self::Transaction { stage, source }
    }
}

impl From<Arc<PoolError>> for DbError {
    fn from(e: Arc<PoolError>) -> Self {
        Self::Pool(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DbError::transaction(TxStage::Commit, sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("failed to commit transaction"));

        let err = DbError::NotFound {
            resource: "user",
            id: "999".into(),
        };
        assert_eq!(err.to_string(), "not found: user '999'");
    }
}
