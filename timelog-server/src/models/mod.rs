//! Request models with validation at construction
//!
//! All caller input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod user;
pub mod validation;

pub use user::{Email, NewUser, UserId, UserName, UserUpdate};
pub use validation::ValidationError;
