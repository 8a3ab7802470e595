//! Auth domain - session tokens, the session cookie, login and logout
//!
//! Responsibilities:
//! - Issuing and validating signed session tokens
//! - Staging the `jwtToken` cookie on login and clearing it on logout

pub mod cookie;
pub mod edges;
pub mod jwt;

pub use cookie::{session_token, SessionCookie, SESSION_COOKIE_NAME};
pub use jwt::{Claims, TokenService};
