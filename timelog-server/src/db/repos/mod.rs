//! Postgres repository implementations
//!
//! Each repository follows these patterns:
//! - Pool is taken from the shared lazy handle on every call
//! - Parameterized statements only
//! - Writes that must be atomic go through a scoped transaction

pub mod projects;
pub mod users;

pub use projects::ProjectRepo;
pub use users::{User, UserRepo};
