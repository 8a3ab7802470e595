//! Session cookie carrying the signed token.
//!
//! The cookie outlives the token it carries (30 days vs 48 hours); an expired
//! token that is still cookied is rejected by `TokenService::validate`.

use anyhow::{Context, Result};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

pub const SESSION_COOKIE_NAME: &str = "jwtToken";

/// 30 days
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Cookie change staged by a resolver and applied to the HTTP response
#[derive(Clone, PartialEq, Eq)]
pub enum SessionCookie {
    Issue(String),
    Clear,
}

impl std::fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionCookie::Issue(_) => f.write_str("Issue(..)"),
            SessionCookie::Clear => f.write_str("Clear"),
        }
    }
}

impl SessionCookie {
    /// `HttpOnly`, not `Secure`, `Path=/`
    pub fn to_cookie(&self) -> Result<Cookie<'static>> {
        let cookie = match self {
            SessionCookie::Issue(token) => format!(
                "{}={}; HttpOnly; Path=/; Max-Age={}",
                SESSION_COOKIE_NAME, token, SESSION_COOKIE_MAX_AGE_SECS
            ),
            SessionCookie::Clear => format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE_NAME),
        };

        Cookie::parse(cookie).context("Failed to build session cookie")
    }

    pub fn apply(&self, jar: CookieJar) -> Result<CookieJar> {
        Ok(jar.add(self.to_cookie()?))
    }
}

/// Session token from the inbound cookies; a blank value counts as absent
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

    #[test]
    fn test_issued_cookie_attributes() {
        let cookie = SessionCookie::Issue("abc.def.ghi".to_string())
            .to_cookie()
            .unwrap();

        assert_eq!(cookie.name(), "jwtToken");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.http_only(), Some(true));
        assert_ne!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age().map(|age| age.whole_seconds()),
            Some(SESSION_COOKIE_MAX_AGE_SECS)
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = SessionCookie::Clear.to_cookie().unwrap();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    }

    #[test]
    fn test_session_token_from_jar() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; jwtToken=tok"));
        assert_eq!(
            session_token(&CookieJar::from_headers(&headers)),
            Some("tok".to_string())
        );

        let mut blank = HeaderMap::new();
        blank.insert(COOKIE, HeaderValue::from_static("jwtToken="));
        assert_eq!(session_token(&CookieJar::from_headers(&blank)), None);
    }
}
