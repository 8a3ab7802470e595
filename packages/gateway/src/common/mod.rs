// Common types and utilities shared across the application

pub mod auth;
pub mod errors;

pub use auth::{AuthError, Identity, RoleTier, TokenError};
pub use errors::{to_field_error, GatewayError, ValidationError};
