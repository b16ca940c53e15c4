//! Database layer - lazy connection pool, stores and repositories
//!
//! # Design Principles
//!
//! - One small pool per process, built on first use and reused afterwards
//! - Handlers see stores through traits, never the pool directly
//! - Transactions roll back on every path that does not commit

pub mod error;
pub mod lazy;
pub mod pool;
pub mod repos;
pub mod store;

pub use error::{DbError, TxStage};
pub use lazy::{LazyPool, SharedPool};
pub use pool::{init_pool, PoolError};
pub use repos::{ProjectRepo, User, UserRepo};
pub use store::{ProjectStore, UserStore};
