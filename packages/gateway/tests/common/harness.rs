//! Test harness over in-memory backends.
//!
//! Every harness gets fresh mock services seeded with a small store:
//!
//! | id | account            | tier        |
//! |----|--------------------|-------------|
//! | 1  | root@shop.test     | super admin |
//! | 2  | bob@shop.test      | shopper     |
//! | 3  | admin@shop.test    | admin       |
//!
//! New signups get ids from 7 upward. All passwords are `pw`.

use axum::Router;
use chrono::{DateTime, Utc};
use gateway_core::common::RoleTier;
use gateway_core::kernel::TestDependencies;
use gateway_core::server::build_app;

use super::GraphQLClient;

pub const SUPER_ADMIN_ID: u32 = 1;
pub const SHOPPER_ID: u32 = 2;
pub const ADMIN_ID: u32 = 3;
pub const FIRST_SIGNUP_ID: u32 = 7;

pub struct TestHarness {
    pub deps: TestDependencies,
}

impl TestHarness {
    pub fn new() -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let deps = TestDependencies::new()
            .with_users(|users| {
                users
                    .with_account(SUPER_ADMIN_ID, "Root", "root@shop.test", "pw", RoleTier::SuperAdmin)
                    .with_account(SHOPPER_ID, "Bob", "bob@shop.test", "pw", RoleTier::User)
                    .with_account(ADMIN_ID, "Ada", "admin@shop.test", "pw", RoleTier::Admin)
                    .with_next_id(FIRST_SIGNUP_ID)
            })
            .with_products(|products| {
                products
                    .with_product(1, "Pen", 5, 10)
                    .with_product(2, "Notebook", 12, 4)
                    .with_product(3, "Lamp", 30, 2)
            });

        Self { deps }
    }

    /// Client without a session cookie
    pub fn anonymous(&self) -> GraphQLClient {
        GraphQLClient::new(self.deps.server_deps(), None)
    }

    /// Client carrying a freshly issued token with the given claims
    pub fn client_as(&self, subject_id: u32, is_admin: bool, is_super_admin: bool) -> GraphQLClient {
        GraphQLClient::new(
            self.deps.server_deps(),
            Some(self.token(subject_id, is_admin, is_super_admin)),
        )
    }

    pub fn shopper(&self) -> GraphQLClient {
        self.client_as(SHOPPER_ID, false, false)
    }

    pub fn admin(&self) -> GraphQLClient {
        self.client_as(ADMIN_ID, true, false)
    }

    pub fn super_admin(&self) -> GraphQLClient {
        self.client_as(SUPER_ADMIN_ID, true, true)
    }

    /// Client carrying an arbitrary cookie value
    pub fn with_cookie(&self, token: &str) -> GraphQLClient {
        GraphQLClient::new(self.deps.server_deps(), Some(token.to_string()))
    }

    pub fn token(&self, subject_id: u32, is_admin: bool, is_super_admin: bool) -> String {
        self.deps
            .tokens
            .issue(subject_id, is_admin, is_super_admin)
            .expect("Failed to issue test token")
    }

    pub fn token_issued_at(&self, subject_id: u32, issued_at: DateTime<Utc>) -> String {
        self.deps
            .tokens
            .issue_at(subject_id, false, false, issued_at)
            .expect("Failed to issue test token")
    }

    /// Full HTTP router over the same backends
    pub fn router(&self) -> Router {
        build_app(self.deps.server_deps(), &[])
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
