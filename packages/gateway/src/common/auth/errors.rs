use thiserror::Error;

use super::RoleTier;

/// Session token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Session token is malformed")]
    Malformed,

    #[error("Session token signature is invalid")]
    SignatureInvalid,

    #[error("Session token has expired")]
    Expired,

    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            _ => TokenError::Malformed,
        }
    }
}

/// Access gate rejections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthenticated: you are not logged in")]
    NoSession,

    #[error("Unauthenticated: {0}")]
    InvalidSession(TokenError),

    #[error("Unauthorized: {required} access required")]
    InsufficientRole { required: RoleTier },
}

impl AuthError {
    /// Machine-readable code placed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NoSession => "NO_SESSION",
            AuthError::InvalidSession(_) => "INVALID_SESSION",
            AuthError::InsufficientRole { .. } => "INSUFFICIENT_ROLE",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::InvalidSession(err)
    }
}
