// TestDependencies - in-memory backend services for tests
//
// Every mock writes to a shared CallLog so tests can assert which backend
// calls happened and in what order. Failures are injected per RPC method name.

use async_trait::async_trait;
use futures::stream;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::traits::{
    BackendError, BackendStream, BaseCartService, BaseOrderService, BaseProductService,
    BaseUserService, BaseWishlistService, StreamFault,
};
use super::ServerDeps;
use crate::common::auth::RoleTier;
use crate::domains::auth::TokenService;
use crate::domains::cart::models::{CartLine, CartLineRef, CartRecord};
use crate::domains::orders::models::{OrderRecord, OrderRef, StatusChange};
use crate::domains::products::models::{NewProduct, ProductRecord, QuantityChange};
use crate::domains::users::models::{AddressRecord, Credentials, NewAddress, NewUser, UserRecord};
use crate::domains::wishlist::models::{WishlistItem, WishlistRecord};

/// Status an order moves to when its owner cancels it
pub const CANCELLED_STATUS: u32 = 4;

// =============================================================================
// Shared plumbing
// =============================================================================

/// Ordered record of backend calls, e.g. `"cart.CreateCart(7)"`
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Whether any call to `method` (e.g. `"wishlist.CreateWishlist"`) was made
    pub fn called(&self, method: &str) -> bool {
        self.0
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.split('(').next() == Some(method))
    }
}

#[derive(Clone, Default)]
struct Failures(Arc<Mutex<HashMap<&'static str, BackendError>>>);

impl Failures {
    fn set(&self, method: &'static str, error: BackendError) {
        self.0.lock().unwrap().insert(method, error);
    }

    fn check(&self, method: &str) -> Result<(), BackendError> {
        match self.0.lock().unwrap().get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Transport fault injected into the next server stream after `after` items
#[derive(Clone, Default)]
struct StreamBreak(Arc<Mutex<Option<(usize, String)>>>);

impl StreamBreak {
    fn set(&self, after: usize, message: &str) {
        *self.0.lock().unwrap() = Some((after, message.to_string()));
    }

    fn stream<T: Send + 'static>(&self, items: Vec<T>) -> BackendStream<T> {
        let mut results: Vec<Result<T, StreamFault>> = items.into_iter().map(Ok).collect();
        if let Some((after, message)) = self.0.lock().unwrap().clone() {
            results.truncate(after);
            results.push(Err(StreamFault::Transport(message)));
        }
        Box::pin(stream::iter(results))
    }
}

fn not_found(service: &'static str, what: &str) -> BackendError {
    BackendError::CallFailed {
        service,
        message: format!("{} not found", what),
    }
}

// =============================================================================
// Mock identity backend
// =============================================================================

#[derive(Clone)]
struct Account {
    record: UserRecord,
    password: String,
    tier: RoleTier,
}

pub struct MockUserService {
    log: CallLog,
    failures: Failures,
    stream_break: StreamBreak,
    next_id: Mutex<u32>,
    accounts: Mutex<Vec<Account>>,
    addresses: Mutex<HashMap<u32, AddressRecord>>,
}

impl MockUserService {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failures: Failures::default(),
            stream_break: StreamBreak::default(),
            next_id: Mutex::new(1),
            accounts: Mutex::new(Vec::new()),
            addresses: Mutex::new(HashMap::new()),
        }
    }

    /// Id handed to the next created account
    pub fn with_next_id(self, id: u32) -> Self {
        *self.next_id.lock().unwrap() = id;
        self
    }

    /// Seed an account that can log in at `tier`
    pub fn with_account(self, id: u32, name: &str, email: &str, password: &str, tier: RoleTier) -> Self {
        self.accounts.lock().unwrap().push(Account {
            record: UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
            },
            password: password.to_string(),
            tier,
        });
        self
    }

    pub fn fail(&self, method: &'static str, error: BackendError) {
        self.failures.set(method, error);
    }

    pub fn break_streams_after(&self, after: usize, message: &str) {
        self.stream_break.set(after, message);
    }

    pub fn account_ids(&self) -> Vec<u32> {
        self.accounts.lock().unwrap().iter().map(|a| a.record.id).collect()
    }

    fn create(&self, user: NewUser, tier: RoleTier) -> UserRecord {
        let mut next_id = self.next_id.lock().unwrap();
        let record = UserRecord {
            id: *next_id,
            name: user.name,
            email: user.email,
        };
        *next_id += 1;

        self.accounts.lock().unwrap().push(Account {
            record: record.clone(),
            password: user.password,
            tier,
        });
        record
    }

    fn login(&self, credentials: &Credentials, tier: RoleTier) -> Result<UserRecord, BackendError> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| {
                a.tier == tier
                    && a.record.email == credentials.email
                    && a.password == credentials.password
            })
            .map(|a| a.record.clone())
            .ok_or_else(|| BackendError::CallFailed {
                service: "user",
                message: "invalid email or password".to_string(),
            })
    }

    fn find(&self, id: u32, tier: RoleTier) -> Result<UserRecord, BackendError> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.tier == tier && a.record.id == id)
            .map(|a| a.record.clone())
            .ok_or_else(|| not_found("user", "account"))
    }

    fn list(&self, tier: RoleTier) -> Vec<UserRecord> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.tier == tier)
            .map(|a| a.record.clone())
            .collect()
    }
}

#[async_trait]
impl BaseUserService for MockUserService {
    async fn user_signup(&self, user: NewUser) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.UserSignup({})", user.email));
        self.failures.check("UserSignup")?;
        Ok(self.create(user, RoleTier::User))
    }

    async fn delete_user(&self, user_id: u32) -> Result<(), BackendError> {
        self.log.record(format!("user.DeleteUser({})", user_id));
        self.failures.check("DeleteUser")?;
        self.accounts.lock().unwrap().retain(|a| a.record.id != user_id);
        Ok(())
    }

    async fn user_login(&self, credentials: Credentials) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.UserLogin({})", credentials.email));
        self.failures.check("UserLogin")?;
        self.login(&credentials, RoleTier::User)
    }

    async fn admin_login(&self, credentials: Credentials) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.AdminLogin({})", credentials.email));
        self.failures.check("AdminLogin")?;
        self.login(&credentials, RoleTier::Admin)
    }

    async fn super_admin_login(
        &self,
        credentials: Credentials,
    ) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.SuperAdminLogin({})", credentials.email));
        self.failures.check("SuperAdminLogin")?;
        self.login(&credentials, RoleTier::SuperAdmin)
    }

    async fn add_admin(&self, admin: NewUser) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.AddAdmin({})", admin.email));
        self.failures.check("AddAdmin")?;
        Ok(self.create(admin, RoleTier::Admin))
    }

    async fn get_user(&self, user_id: u32) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.GetUser({})", user_id));
        self.failures.check("GetUser")?;
        self.find(user_id, RoleTier::User)
    }

    async fn get_admin(&self, admin_id: u32) -> Result<UserRecord, BackendError> {
        self.log.record(format!("user.GetAdmin({})", admin_id));
        self.failures.check("GetAdmin")?;
        self.find(admin_id, RoleTier::Admin)
    }

    async fn get_all_users(&self) -> Result<BackendStream<UserRecord>, BackendError> {
        self.log.record("user.GetAllUsers()");
        self.failures.check("GetAllUsers")?;
        Ok(self.stream_break.stream(self.list(RoleTier::User)))
    }

    async fn get_all_admins(&self) -> Result<BackendStream<UserRecord>, BackendError> {
        self.log.record("user.GetAllAdmins()");
        self.failures.check("GetAllAdmins")?;
        Ok(self.stream_break.stream(self.list(RoleTier::Admin)))
    }

    async fn add_address(&self, address: NewAddress) -> Result<AddressRecord, BackendError> {
        self.log.record(format!("user.AddAddress({})", address.user_id));
        self.failures.check("AddAddress")?;

        let mut addresses = self.addresses.lock().unwrap();
        let record = AddressRecord {
            id: addresses.len() as u32 + 1,
            user_id: address.user_id,
            city: address.city,
            district: address.district,
            state: address.state,
            road: address.road,
        };
        addresses.insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn get_address(&self, user_id: u32) -> Result<AddressRecord, BackendError> {
        self.log.record(format!("user.GetAddress({})", user_id));
        self.failures.check("GetAddress")?;
        self.addresses
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or_else(|| not_found("user", "address"))
    }

    async fn remove_address(&self, user_id: u32) -> Result<AddressRecord, BackendError> {
        self.log.record(format!("user.RemoveAddress({})", user_id));
        self.failures.check("RemoveAddress")?;
        self.addresses
            .lock()
            .unwrap()
            .remove(&user_id)
            .ok_or_else(|| not_found("user", "address"))
    }
}

// =============================================================================
// Mock catalog backend
// =============================================================================

pub struct MockProductService {
    log: CallLog,
    failures: Failures,
    stream_break: StreamBreak,
    products: Mutex<Vec<ProductRecord>>,
}

impl MockProductService {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failures: Failures::default(),
            stream_break: StreamBreak::default(),
            products: Mutex::new(Vec::new()),
        }
    }

    pub fn with_product(self, id: u32, name: &str, price: i32, quantity: i32) -> Self {
        self.products.lock().unwrap().push(ProductRecord {
            id,
            name: name.to_string(),
            price,
            quantity,
            total: 0,
        });
        self
    }

    pub fn fail(&self, method: &'static str, error: BackendError) {
        self.failures.set(method, error);
    }

    pub fn break_streams_after(&self, after: usize, message: &str) {
        self.stream_break.set(after, message);
    }
}

#[async_trait]
impl BaseProductService for MockProductService {
    async fn add_product(&self, product: NewProduct) -> Result<ProductRecord, BackendError> {
        self.log.record(format!("product.AddProduct({})", product.name));
        self.failures.check("AddProduct")?;

        let mut products = self.products.lock().unwrap();
        let record = ProductRecord {
            id: products.len() as u32 + 1,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            total: 0,
        };
        products.push(record.clone());
        Ok(record)
    }

    async fn get_product(&self, product_id: u32) -> Result<ProductRecord, BackendError> {
        self.log.record(format!("product.GetProduct({})", product_id));
        self.failures.check("GetProduct")?;
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| not_found("product", "product"))
    }

    async fn get_all_products(&self) -> Result<BackendStream<ProductRecord>, BackendError> {
        self.log.record("product.GetAllProducts()");
        self.failures.check("GetAllProducts")?;
        let products = self.products.lock().unwrap().clone();
        Ok(self.stream_break.stream(products))
    }

    async fn update_quantity(
        &self,
        change: QuantityChange,
    ) -> Result<ProductRecord, BackendError> {
        self.log.record(format!("product.UpdateQuantity({})", change.id));
        self.failures.check("UpdateQuantity")?;

        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == change.id)
            .ok_or_else(|| not_found("product", "product"))?;

        if change.increase {
            product.quantity += change.quantity;
        } else if product.quantity >= change.quantity {
            product.quantity -= change.quantity;
        } else {
            return Err(BackendError::CallFailed {
                service: "product",
                message: "not enough stock".to_string(),
            });
        }
        Ok(product.clone())
    }
}

// =============================================================================
// Mock commerce backends
// =============================================================================

pub struct MockCartService {
    log: CallLog,
    failures: Failures,
    stream_break: StreamBreak,
    unowned_carts: Mutex<bool>,
    lines: Mutex<Vec<CartRecord>>,
}

impl MockCartService {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failures: Failures::default(),
            stream_break: StreamBreak::default(),
            unowned_carts: Mutex::new(false),
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, method: &'static str, error: BackendError) {
        self.failures.set(method, error);
    }

    /// Make CreateCart answer with `userId = 0`
    pub fn return_unowned_carts(&self) {
        *self.unowned_carts.lock().unwrap() = true;
    }

    pub fn break_streams_after(&self, after: usize, message: &str) {
        self.stream_break.set(after, message);
    }
}

#[async_trait]
impl BaseCartService for MockCartService {
    async fn create_cart(&self, user_id: u32) -> Result<CartRecord, BackendError> {
        self.log.record(format!("cart.CreateCart({})", user_id));
        self.failures.check("CreateCart")?;

        let owner = if *self.unowned_carts.lock().unwrap() {
            0
        } else {
            user_id
        };
        Ok(CartRecord {
            id: user_id,
            user_id: owner,
            product_id: 0,
            quantity: 0,
            total: 0.0,
        })
    }

    async fn delete_cart(&self, user_id: u32) -> Result<(), BackendError> {
        self.log.record(format!("cart.DeleteCart({})", user_id));
        self.failures.check("DeleteCart")?;
        self.lines.lock().unwrap().retain(|l| l.user_id != user_id);
        Ok(())
    }

    async fn add_to_cart(&self, line: CartLine) -> Result<CartRecord, BackendError> {
        self.log.record(format!("cart.AddToCart({}, {})", line.user_id, line.product_id));
        self.failures.check("AddToCart")?;

        let mut lines = self.lines.lock().unwrap();
        let record = CartRecord {
            id: lines.len() as u32 + 1,
            user_id: line.user_id,
            product_id: line.product_id,
            quantity: line.quantity,
            total: 0.0,
        };
        lines.push(record.clone());
        Ok(record)
    }

    async fn remove_from_cart(&self, line: CartLineRef) -> Result<CartRecord, BackendError> {
        self.log.record(format!(
            "cart.RemoveFromCart({}, {})",
            line.user_id, line.product_id
        ));
        self.failures.check("RemoveFromCart")?;

        let mut lines = self.lines.lock().unwrap();
        let index = lines
            .iter()
            .position(|l| l.user_id == line.user_id && l.product_id == line.product_id)
            .ok_or_else(|| not_found("cart", "cart item"))?;
        Ok(lines.remove(index))
    }

    async fn get_all_cart_items(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<CartRecord>, BackendError> {
        self.log.record(format!("cart.GetAllCartItems({})", user_id));
        self.failures.check("GetAllCartItems")?;

        let lines: Vec<CartRecord> = self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        Ok(self.stream_break.stream(lines))
    }
}

pub struct MockOrderService {
    log: CallLog,
    failures: Failures,
    stream_break: StreamBreak,
    orders: Mutex<Vec<(u32, OrderRecord)>>,
}

impl MockOrderService {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failures: Failures::default(),
            stream_break: StreamBreak::default(),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, method: &'static str, error: BackendError) {
        self.failures.set(method, error);
    }

    pub fn break_streams_after(&self, after: usize, message: &str) {
        self.stream_break.set(after, message);
    }

    fn update(
        &self,
        order_id: u32,
        owner: Option<u32>,
        status_id: u32,
    ) -> Result<OrderRecord, BackendError> {
        let mut orders = self.orders.lock().unwrap();
        let (_, order) = orders
            .iter_mut()
            .find(|(user_id, o)| o.order_id == order_id && owner.map_or(true, |u| u == *user_id))
            .ok_or_else(|| not_found("order", "order"))?;
        order.order_status_id = status_id;
        Ok(order.clone())
    }
}

#[async_trait]
impl BaseOrderService for MockOrderService {
    async fn order_all(&self, user_id: u32) -> Result<OrderRecord, BackendError> {
        self.log.record(format!("order.OrderAll({})", user_id));
        self.failures.check("OrderAll")?;

        let mut orders = self.orders.lock().unwrap();
        let order = OrderRecord {
            order_id: orders.len() as u32 + 1,
            order_items: Vec::new(),
            address_id: 0,
            order_status_id: 1,
            payment_type_id: 1,
            total: 0.0,
        };
        orders.push((user_id, order.clone()));
        Ok(order)
    }

    async fn get_all_orders_user(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<OrderRecord>, BackendError> {
        self.log.record(format!("order.GetAllOrdersUser({})", user_id));
        self.failures.check("GetAllOrdersUser")?;

        let orders: Vec<OrderRecord> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, o)| o.clone())
            .collect();
        Ok(self.stream_break.stream(orders))
    }

    async fn get_all_orders(&self) -> Result<BackendStream<OrderRecord>, BackendError> {
        self.log.record("order.GetAllOrders()");
        self.failures.check("GetAllOrders")?;

        let orders: Vec<OrderRecord> =
            self.orders.lock().unwrap().iter().map(|(_, o)| o.clone()).collect();
        Ok(self.stream_break.stream(orders))
    }

    async fn get_order(&self, order: OrderRef) -> Result<OrderRecord, BackendError> {
        self.log
            .record(format!("order.GetOrder({}, {})", order.order_id, order.user_id));
        self.failures.check("GetOrder")?;

        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|(owner, o)| *owner == order.user_id && o.order_id == order.order_id)
            .map(|(_, o)| o.clone())
            .ok_or_else(|| not_found("order", "order"))
    }

    async fn user_cancel_order(&self, order: OrderRef) -> Result<OrderRecord, BackendError> {
        self.log.record(format!(
            "order.UserCancelOrder({}, {})",
            order.order_id, order.user_id
        ));
        self.failures.check("UserCancelOrder")?;
        self.update(order.order_id, Some(order.user_id), CANCELLED_STATUS)
    }

    async fn change_order_status(
        &self,
        change: StatusChange,
    ) -> Result<OrderRecord, BackendError> {
        self.log.record(format!(
            "order.ChangeOrderStatus({}, {})",
            change.order_id, change.status_id
        ));
        self.failures.check("ChangeOrderStatus")?;
        self.update(change.order_id, None, change.status_id)
    }
}

pub struct MockWishlistService {
    log: CallLog,
    failures: Failures,
    stream_break: StreamBreak,
    items: Mutex<Vec<WishlistRecord>>,
}

impl MockWishlistService {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failures: Failures::default(),
            stream_break: StreamBreak::default(),
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, method: &'static str, error: BackendError) {
        self.failures.set(method, error);
    }

    pub fn break_streams_after(&self, after: usize, message: &str) {
        self.stream_break.set(after, message);
    }
}

#[async_trait]
impl BaseWishlistService for MockWishlistService {
    async fn create_wishlist(&self, user_id: u32) -> Result<WishlistRecord, BackendError> {
        self.log.record(format!("wishlist.CreateWishlist({})", user_id));
        self.failures.check("CreateWishlist")?;
        Ok(WishlistRecord {
            id: user_id,
            product_id: 0,
            user_id,
        })
    }

    async fn add_to_wishlist(&self, item: WishlistItem) -> Result<WishlistRecord, BackendError> {
        self.log.record(format!(
            "wishlist.AddToWishlist({}, {})",
            item.user_id, item.product_id
        ));
        self.failures.check("AddToWishlist")?;

        let mut items = self.items.lock().unwrap();
        let record = WishlistRecord {
            id: items.len() as u32 + 1,
            product_id: item.product_id,
            user_id: item.user_id,
        };
        items.push(record.clone());
        Ok(record)
    }

    async fn remove_from_wishlist(
        &self,
        item: WishlistItem,
    ) -> Result<WishlistRecord, BackendError> {
        self.log.record(format!(
            "wishlist.RemoveFromWishlist({}, {})",
            item.user_id, item.product_id
        ));
        self.failures.check("RemoveFromWishlist")?;

        let mut items = self.items.lock().unwrap();
        let index = items
            .iter()
            .position(|w| w.user_id == item.user_id && w.product_id == item.product_id)
            .ok_or_else(|| not_found("wishlist", "wishlist item"))?;
        Ok(items.remove(index))
    }

    async fn get_all_wishlist_items(
        &self,
        user_id: u32,
    ) -> Result<BackendStream<WishlistRecord>, BackendError> {
        self.log.record(format!("wishlist.GetAllWishlistItems({})", user_id));
        self.failures.check("GetAllWishlistItems")?;

        let items: Vec<WishlistRecord> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        Ok(self.stream_break.stream(items))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Secret used to sign session tokens in tests
pub const TEST_SECRET: &str = "test_secret_key";

/// Container for all mock backends, sharing one call log
pub struct TestDependencies {
    pub log: CallLog,
    pub users: Arc<MockUserService>,
    pub products: Arc<MockProductService>,
    pub carts: Arc<MockCartService>,
    pub orders: Arc<MockOrderService>,
    pub wishlists: Arc<MockWishlistService>,
    pub tokens: Arc<TokenService>,
    pub backend_deadline: Duration,
}

impl TestDependencies {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            users: Arc::new(MockUserService::new(log.clone())),
            products: Arc::new(MockProductService::new(log.clone())),
            carts: Arc::new(MockCartService::new(log.clone())),
            orders: Arc::new(MockOrderService::new(log.clone())),
            wishlists: Arc::new(MockWishlistService::new(log.clone())),
            tokens: Arc::new(TokenService::new(TEST_SECRET)),
            backend_deadline: Duration::from_secs(5),
            log,
        }
    }

    /// Replace the user backend, keeping the shared log
    pub fn with_users(mut self, build: impl FnOnce(MockUserService) -> MockUserService) -> Self {
        self.users = Arc::new(build(MockUserService::new(self.log.clone())));
        self
    }

    /// Replace the product backend, keeping the shared log
    pub fn with_products(
        mut self,
        build: impl FnOnce(MockProductService) -> MockProductService,
    ) -> Self {
        self.products = Arc::new(build(MockProductService::new(self.log.clone())));
        self
    }

    pub fn server_deps(&self) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.users.clone(),
            self.products.clone(),
            self.carts.clone(),
            self.orders.clone(),
            self.wishlists.clone(),
            self.tokens.clone(),
            self.backend_deadline,
        ))
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
