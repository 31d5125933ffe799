//! User domain
//!
//! Users are owned by the hosted identity platform. This process only sees
//! the identifier and role carried by a verified access token.

mod entity;
mod validation;

pub use entity::{Actor, UserId, UserRole};
pub use validation::{validate_user_id, UserValidationError};
