//! Error types surfaced through GraphQL.
//!
//! Every mutation converts its raw GraphQL arguments into a typed request
//! through the `require_*` helpers before any backend is contacted. Resolver
//! failures of every kind are funnelled into [`GatewayError`], which carries
//! the machine-readable code placed in the field error's extensions.

use juniper::{FieldError, Object, Value};
use thiserror::Error;

use crate::common::auth::{AuthError, TokenError};
use crate::domains::users::workflows::OrchestrationError;
use crate::kernel::BackendError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Non-blank string argument, trimmed
pub fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Non-blank string argument, passed on byte for byte (secrets)
pub fn require_present(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Identifier argument; GraphQL only has signed ints
pub fn require_id(field: &'static str, value: i32) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::InvalidValue {
        field,
        reason: "must not be negative",
    })
}

pub fn require_positive(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::InvalidValue {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}

/// Any failure a resolver can surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl GatewayError {
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Auth(err) => err.code(),
            GatewayError::Backend(err) => err.code(),
            GatewayError::Validation(_) => "VALIDATION",
            GatewayError::Orchestration(_) => "ORCHESTRATION",
            GatewayError::Token(_) => "TOKEN",
        }
    }
}

/// Convert a resolver failure to a juniper FieldError with `extensions.code`
pub fn to_field_error(err: impl Into<GatewayError>) -> FieldError {
    let err = err.into();

    let mut extensions = Object::with_capacity(1);
    extensions.add_field("code", Value::scalar(err.code().to_string()));

    FieldError::new(err.to_string(), Value::Object(extensions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_missing() {
        assert_eq!(
            require_text("name", "   ".to_string()),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(require_text("name", " Ann ".to_string()), Ok("Ann".to_string()));
    }

    #[test]
    fn test_present_value_is_not_trimmed() {
        assert_eq!(
            require_present("password", "  s3cret  ".to_string()),
            Ok("  s3cret  ".to_string())
        );
        assert_eq!(
            require_present("password", " \t".to_string()),
            Err(ValidationError::MissingField("password"))
        );
    }

    #[test]
    fn test_negative_id_rejected() {
        assert!(require_id("id", -1).is_err());
        assert_eq!(require_id("id", 0), Ok(0));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(
            require_positive("quantity", 0).unwrap_err().to_string(),
            "quantity must be greater than zero"
        );
    }

    #[test]
    fn test_field_error_carries_code() {
        let err = to_field_error(AuthError::NoSession);

        assert_eq!(err.message(), "Unauthenticated: you are not logged in");
        assert_eq!(
            err.extensions(),
            &juniper::graphql_value!({ "code": "NO_SESSION" })
        );
    }

    #[test]
    fn test_backend_error_code_passes_through() {
        let err = GatewayError::from(BackendError::DeadlineExceeded { service: "cart" });
        assert_eq!(err.code(), "BACKEND_DEADLINE_EXCEEDED");
        assert_eq!(
            GatewayError::from(ValidationError::MissingField("email")).to_string(),
            "email is required"
        );
    }
}
