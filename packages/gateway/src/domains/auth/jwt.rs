use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::auth::{Identity, TokenError};

/// Lifetime of a session token, independent of the cookie's Max-Age
pub const TOKEN_TTL_HOURS: i64 = 48;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: u32,         // Subject id (0 only for anonymous tokens)
    pub is_admin: bool,       // Admin flag
    pub is_super_admin: bool, // Super admin flag
    pub exp: i64,             // Expiration timestamp
    pub iat: i64,             // Issued at timestamp
    pub jti: String,          // JWT ID (unique token identifier)
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            subject_id: claims.user_id,
            is_admin: claims.is_admin,
            is_super_admin: claims.is_super_admin,
        }
    }
}

/// Token Service - issues and validates session tokens
///
/// Built once at startup from the configured secret and shared by every request.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    unverified: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let mut unverified = Validation::new(Algorithm::HS256);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            unverified,
        }
    }

    /// Issue a token that expires 48 hours from now
    pub fn issue(
        &self,
        subject_id: u32,
        is_admin: bool,
        is_super_admin: bool,
    ) -> Result<String, TokenError> {
        self.issue_at(subject_id, is_admin, is_super_admin, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(
        &self,
        subject_id: u32,
        is_admin: bool,
        is_super_admin: bool,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = issued_at + Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            user_id: subject_id,
            is_admin,
            is_super_admin,
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify and decode a session token
    ///
    /// Expiry is judged from the payload before the signature, so a stale token
    /// is reported as `Expired` whichever key signed it. The signed decode checks
    /// expiry again and the result is re-checked against the clock once more.
    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        let now = Utc::now().timestamp();

        let payload = decode::<Claims>(token, &self.decoding_key, &self.unverified)
            .map_err(|_| TokenError::Malformed)?
            .claims;
        if payload.exp < now {
            return Err(TokenError::Expired);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        if claims.exp < now {
            return Err(TokenError::Expired);
        }

        Ok(claims.into())
    }
}
