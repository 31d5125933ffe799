//! Authentication infrastructure module
//!
//! Access tokens are issued by the identity platform; this module only
//! verifies them.

mod jwt;

pub use jwt::{AccessClaims, AppMetadata, JwtConfig, JwtService, TokenVerifier};
