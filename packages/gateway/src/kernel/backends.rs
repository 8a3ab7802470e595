// HTTP-backed implementations of the backend service traits
//
// Each adapter maps trait methods onto the service's RPC method names.

use async_trait::async_trait;
use serde::Serialize;

use super::rpc_client::RpcClient;
use super::traits::{
    BackendError, BackendStream, BaseCartService, BaseOrderService, BaseProductService,
    BaseUserService, BaseWishlistService,
};
use crate::domains::cart::models::{CartLine, CartLineRef, CartRecord};
use crate::domains::orders::models::{OrderRecord, OrderRef, StatusChange};
use crate::domains::products::models::{NewProduct, ProductRecord, QuantityChange};
use crate::domains::users::models::{AddressRecord, Credentials, NewAddress, NewUser, UserRecord};
use crate::domains::wishlist::models::{WishlistItem, WishlistRecord};

#[derive(Serialize)]
struct Empty {}

#[derive(Serialize)]
struct ById {
    id: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ByUser {
    user_id: u32,
}

// =============================================================================
// Identity backend
// =============================================================================

pub struct HttpUserService(RpcClient);

impl HttpUserService {
    pub fn new(client: RpcClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseUserService for HttpUserService {
    async fn user_signup(&self, user: NewUser) -> Result<UserRecord, BackendError> {
        self.0.unary("UserSignup", &user).await
    }

    async fn delete_user(&self, user_id: u32) -> Result<(), BackendError> {
        self.0.unary_ack("DeleteUser", &ById { id: user_id }).await
    }

    async fn user_login(&self, credentials: Credentials) -> Result<UserRecord, BackendError> {
        self.0.unary("UserLogin", &credentials).await
    }

    async fn admin_login(&self, credentials: Credentials) -> Result<UserRecord, BackendError> {
        self.0.unary("AdminLogin", &credentials).await
    }

    async fn super_admin_login(
        &self,
        credentials: Credentials,
    ) -> Result<UserRecord, BackendError> {
        self.0.unary("SuperAdminLogin", &credentials).await
    }

    async fn add_admin(&self, admin: NewUser) -> Result<UserRecord, BackendError> {
        self.0.unary("AddAdmin", &admin).await
    }

    async fn get_user(&self, user_id: u32) -> Result<UserRecord, BackendError> {
        self.0.unary("GetUser", &ById { id: user_id }).await
    }

    async fn get_admin(&self, admin_id: u32) -> Result<UserRecord, BackendError> {
        self.0.unary("GetAdmin", &ById { id: admin_id }).await
    }

    async fn get_all_users(&self) -> Result<BackendStream<UserRecord>, BackendError> {
        self.0.server_stream("GetAllUsers", &Empty {}).await
    }

    async fn get_all_admins(&self) -> Result<BackendStream<UserRecord>, BackendError> {
        self.0.server_stream("GetAllAdmins", &Empty {}).await
    }

    async fn add_address(&self, address: NewAddress) -> Result<AddressRecord, BackendError> {
        self.0.unary("AddAddress", &address).await
    }

    async fn get_address(&self, user_id: u32) -> Result<AddressRecord, BackendError> {
        self.0.unary("GetAddress", &ById { id: user_id }).await
    }

    async fn remove_address(&self, user_id: u32) -> Result<AddressRecord, BackendError> {
        self.0.unary("RemoveAddress", &ById { id: user_id }).await
    }
}

// =============================================================================
// Catalog backend
// =============================================================================

pub struct HttpProductService(RpcClient);

impl HttpProductService {
    pub fn new(client: RpcClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseProductService for HttpProductService {
    async fn add_product(&self, product: NewProduct) -> Result<ProductRecord, BackendError> {
        self.0.unary("AddProduct", &product).await
    }

    async fn get_product(&self, product_id: u32) -> Result<ProductRecord, BackendError> {
        self.0.unary("GetProduct", &ById { id: product_id }).await
    }

    async fn get_all_products(&self) -> Result<BackendStream<ProductRecord>, BackendError> {
        self.0.server_stream("GetAllProducts", &Empty {}).await
    }

    async fn update_quantity(
        &self,
        change: QuantityChange,
    ) -> Result<ProductRecord, BackendError> {
        self.0.unary("UpdateQuantity", &change).await
    }
}

// =============================================================================
// Commerce backends
// =============================================================================

pub struct HttpCartService(RpcClient);

impl HttpCartService {
    pub fn new(client: RpcClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseCartService for HttpCartService {
    async fn create_cart(&self, user_id: u32) -> Result<CartRecord, BackendError> {
        self.0.unary("CreateCart", &ByUser { user_id }).await
    }

    async fn delete_cart(&self, user_id: u32) -> Result<(), BackendError> {
        self.0.unary_ack("DeleteCart", &ByUser { user_id }).await
    }

    async fn add_to_cart(&self, line: CartLine) -> Result<CartRecord, BackendError> {
        self.0.unary("AddToCart", &line).await
    }

    async fn remove_from_cart(&self, line: CartLineRef) -> Result<CartRecord, BackendError> {
        self.0.unary("RemoveFromCart", &line).await
    }

    async fn get_all_cart_items(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<CartRecord>, BackendError> {
        self.0.server_stream("GetAllCartItems", &ByUser { user_id }).await
    }
}

pub struct HttpOrderService(RpcClient);

impl HttpOrderService {
    pub fn new(client: RpcClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseOrderService for HttpOrderService {
    async fn order_all(&self, user_id: u32) -> Result<OrderRecord, BackendError> {
        self.0.unary("OrderAll", &ByUser { user_id }).await
    }

    async fn get_all_orders_user(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<OrderRecord>, BackendError> {
        self.0.server_stream("GetAllOrdersUser", &ByUser { user_id }).await
    }

    async fn get_all_orders(&self) -> Result<BackendStream<OrderRecord>, BackendError> {
        self.0.server_stream("GetAllOrders", &Empty {}).await
    }

    async fn get_order(&self, order: OrderRef) -> Result<OrderRecord, BackendError> {
        self.0.unary("GetOrder", &order).await
    }

    async fn user_cancel_order(&self, order: OrderRef) -> Result<OrderRecord, BackendError> {
        self.0.unary("UserCancelOrder", &order).await
    }

    async fn change_order_status(
        &self,
        change: StatusChange,
    ) -> Result<OrderRecord, BackendError> {
        self.0.unary("ChangeOrderStatus", &change).await
    }
}

pub struct HttpWishlistService(RpcClient);

impl HttpWishlistService {
    pub fn new(client: RpcClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseWishlistService for HttpWishlistService {
    async fn create_wishlist(&self, user_id: u32) -> Result<WishlistRecord, BackendError> {
        self.0.unary("CreateWishlist", &ByUser { user_id }).await
    }

    async fn add_to_wishlist(&self, item: WishlistItem) -> Result<WishlistRecord, BackendError> {
        self.0.unary("AddToWishlist", &item).await
    }

    async fn remove_from_wishlist(
        &self,
        item: WishlistItem,
    ) -> Result<WishlistRecord, BackendError> {
        self.0.unary("RemoveFromWishlist", &item).await
    }

    async fn get_all_wishlist_items(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<WishlistRecord>, BackendError> {
        self.0
            .server_stream("GetAllWishlistItems", &ByUser { user_id })
            .await
    }
}
