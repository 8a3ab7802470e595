// Commerce Gateway - API Core
//
// GraphQL front door for the commerce backends. Authenticates callers with
// signed session cookies, gates resolvers by role tier, and fans each field
// out to the user, product, cart, order and wishlist services.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
