// Trait definitions for the backend services
//
// These are the collaborator contracts only: every backend operation is either
// a unary call or a server stream. Transport lives in kernel/backends.rs,
// in-memory doubles in kernel/test_dependencies.rs.
//
// Naming convention: Base* for trait names (e.g., BaseUserService)

use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;
use thiserror::Error;

use crate::domains::cart::models::{CartLine, CartLineRef, CartRecord};
use crate::domains::orders::models::{OrderRecord, OrderRef, StatusChange};
use crate::domains::products::models::{NewProduct, ProductRecord, QuantityChange};
use crate::domains::users::models::{AddressRecord, Credentials, NewAddress, NewUser, UserRecord};
use crate::domains::wishlist::models::{WishlistItem, WishlistRecord};

// =============================================================================
// Errors and stream shape
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{service} service is unavailable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },

    #[error("{service} service call failed: {message}")]
    CallFailed {
        service: &'static str,
        message: String,
    },

    #[error("{service} service stream aborted: {message}")]
    StreamAborted {
        service: &'static str,
        message: String,
    },

    #[error("{service} service did not answer before the request deadline")]
    DeadlineExceeded { service: &'static str },
}

impl BackendError {
    pub fn service(&self) -> &'static str {
        match self {
            BackendError::Unavailable { service, .. }
            | BackendError::CallFailed { service, .. }
            | BackendError::StreamAborted { service, .. }
            | BackendError::DeadlineExceeded { service } => service,
        }
    }

    /// Machine-readable code placed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            BackendError::Unavailable { .. } => "BACKEND_UNAVAILABLE",
            BackendError::CallFailed { .. } => "BACKEND_CALL_FAILED",
            BackendError::StreamAborted { .. } => "BACKEND_STREAM_ABORTED",
            BackendError::DeadlineExceeded { .. } => "BACKEND_DEADLINE_EXCEEDED",
        }
    }
}

/// Failure observed while reading a server stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFault {
    /// One item could not be received or decoded; later items may still arrive
    Item(String),
    /// The stream itself broke; nothing after this point is trustworthy
    Transport(String),
}

/// Server-streamed response. Exhaustion (`None`) is the end-of-stream marker.
pub type BackendStream<T> = Pin<Box<dyn Stream<Item = Result<T, StreamFault>> + Send>>;

// =============================================================================
// Identity backend
// =============================================================================

#[async_trait]
pub trait BaseUserService: Send + Sync {
    async fn user_signup(&self, user: NewUser) -> Result<UserRecord, BackendError>;

    /// Removes a user; used to compensate a failed signup
    async fn delete_user(&self, user_id: u32) -> Result<(), BackendError>;

    async fn user_login(&self, credentials: Credentials) -> Result<UserRecord, BackendError>;

    async fn admin_login(&self, credentials: Credentials) -> Result<UserRecord, BackendError>;

    async fn super_admin_login(&self, credentials: Credentials)
        -> Result<UserRecord, BackendError>;

    async fn add_admin(&self, admin: NewUser) -> Result<UserRecord, BackendError>;

    async fn get_user(&self, user_id: u32) -> Result<UserRecord, BackendError>;

    async fn get_admin(&self, admin_id: u32) -> Result<UserRecord, BackendError>;

    async fn get_all_users(&self) -> Result<BackendStream<UserRecord>, BackendError>;

    async fn get_all_admins(&self) -> Result<BackendStream<UserRecord>, BackendError>;

    async fn add_address(&self, address: NewAddress) -> Result<AddressRecord, BackendError>;

    async fn get_address(&self, user_id: u32) -> Result<AddressRecord, BackendError>;

    async fn remove_address(&self, user_id: u32) -> Result<AddressRecord, BackendError>;
}

// =============================================================================
// Catalog backend
// =============================================================================

#[async_trait]
pub trait BaseProductService: Send + Sync {
    async fn add_product(&self, product: NewProduct) -> Result<ProductRecord, BackendError>;

    async fn get_product(&self, product_id: u32) -> Result<ProductRecord, BackendError>;

    async fn get_all_products(&self) -> Result<BackendStream<ProductRecord>, BackendError>;

    async fn update_quantity(&self, change: QuantityChange)
        -> Result<ProductRecord, BackendError>;
}

// =============================================================================
// Commerce backends
// =============================================================================

#[async_trait]
pub trait BaseCartService: Send + Sync {
    async fn create_cart(&self, user_id: u32) -> Result<CartRecord, BackendError>;

    /// Removes a user's cart; used to compensate a failed signup
    async fn delete_cart(&self, user_id: u32) -> Result<(), BackendError>;

    async fn add_to_cart(&self, line: CartLine) -> Result<CartRecord, BackendError>;

    async fn remove_from_cart(&self, line: CartLineRef) -> Result<CartRecord, BackendError>;

    async fn get_all_cart_items(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<CartRecord>, BackendError>;
}

#[async_trait]
pub trait BaseOrderService: Send + Sync {
    async fn order_all(&self, user_id: u32) -> Result<OrderRecord, BackendError>;

    async fn get_all_orders_user(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<OrderRecord>, BackendError>;

    async fn get_all_orders(&self) -> Result<BackendStream<OrderRecord>, BackendError>;

    async fn get_order(&self, order: OrderRef) -> Result<OrderRecord, BackendError>;

    async fn user_cancel_order(&self, order: OrderRef) -> Result<OrderRecord, BackendError>;

    async fn change_order_status(&self, change: StatusChange)
        -> Result<OrderRecord, BackendError>;
}

#[async_trait]
pub trait BaseWishlistService: Send + Sync {
    async fn create_wishlist(&self, user_id: u32) -> Result<WishlistRecord, BackendError>;

    async fn add_to_wishlist(&self, item: WishlistItem) -> Result<WishlistRecord, BackendError>;

    async fn remove_from_wishlist(
        &self,
        item: WishlistItem,
    ) -> Result<WishlistRecord, BackendError>;

    async fn get_all_wishlist_items(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<WishlistRecord>, BackendError>;
}
