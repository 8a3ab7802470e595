//! Server dependencies for resolvers (using traits for testability)
//!
//! Built once at startup and shared read-only by every request; nothing here
//! is mutated after construction.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domains::auth::TokenService;
use crate::kernel::backends::{
    HttpCartService, HttpOrderService, HttpProductService, HttpUserService, HttpWishlistService,
};
use crate::kernel::rpc_client::RpcClient;
use crate::kernel::{
    BaseCartService, BaseOrderService, BaseProductService, BaseUserService, BaseWishlistService,
};

/// Server dependencies accessible to resolvers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn BaseUserService>,
    pub products: Arc<dyn BaseProductService>,
    pub carts: Arc<dyn BaseCartService>,
    pub orders: Arc<dyn BaseOrderService>,
    pub wishlists: Arc<dyn BaseWishlistService>,
    /// Session token signing and validation
    pub tokens: Arc<TokenService>,
    /// Budget for all backend work of one inbound request
    pub backend_deadline: Duration,
}

impl ServerDeps {
    pub fn new(
        users: Arc<dyn BaseUserService>,
        products: Arc<dyn BaseProductService>,
        carts: Arc<dyn BaseCartService>,
        orders: Arc<dyn BaseOrderService>,
        wishlists: Arc<dyn BaseWishlistService>,
        tokens: Arc<TokenService>,
        backend_deadline: Duration,
    ) -> Self {
        Self {
            users,
            products,
            carts,
            orders,
            wishlists,
            tokens,
            backend_deadline,
        }
    }

    /// Wire HTTP backend clients from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build backend HTTP client")?;

        let client = |service: &'static str, url: &str| RpcClient::new(service, url, http.clone());

        Ok(Self::new(
            Arc::new(HttpUserService::new(client("user", &config.user_service_url)?)),
            Arc::new(HttpProductService::new(client(
                "product",
                &config.product_service_url,
            )?)),
            Arc::new(HttpCartService::new(client("cart", &config.cart_service_url)?)),
            Arc::new(HttpOrderService::new(client("order", &config.order_service_url)?)),
            Arc::new(HttpWishlistService::new(client(
                "wishlist",
                &config.wishlist_service_url,
            )?)),
            Arc::new(TokenService::new(&config.jwt_secret)),
            config.backend_deadline,
        ))
    }
}
