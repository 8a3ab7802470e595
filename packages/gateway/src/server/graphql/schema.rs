//! GraphQL schema definition.
//!
//! Field names are the gateway's public wire names. Gated fields wrap their
//! edge in an `AccessGate`; public fields call the edge directly.

use juniper::{EmptySubscription, FieldResult, RootNode, ID};

use super::context::GraphQLContext;
use crate::server::middleware::AccessGate;

// Domain edges
use crate::domains::auth::edges::{mutation as auth_mutations, query as auth_queries};
use crate::domains::cart::edges::{mutation as cart_mutations, query as cart_queries};
use crate::domains::orders::edges::{mutation as order_mutations, query as order_queries};
use crate::domains::products::edges::{mutation as product_mutations, query as product_queries};
use crate::domains::users::edges::{mutation as user_mutations, query as user_queries};
use crate::domains::wishlist::edges::{mutation as wishlist_mutations, query as wishlist_queries};

// Domain data types (GraphQL types)
use crate::domains::cart::data::CartData;
use crate::domains::orders::data::OrderData;
use crate::domains::products::data::ProductData;
use crate::domains::users::data::{AddressData, UserData};
use crate::domains::wishlist::data::WishlistData;

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Catalog (public)
    // =========================================================================

    /// All products
    async fn products(ctx: &GraphQLContext) -> FieldResult<Vec<ProductData>> {
        product_queries::products(ctx).await
    }

    async fn product(ctx: &GraphQLContext, id: i32) -> FieldResult<ProductData> {
        product_queries::product(ctx, id).await
    }

    // =========================================================================
    // Login (public, sets the session cookie)
    // =========================================================================

    #[graphql(name = "UserLogin")]
    async fn user_login(
        ctx: &GraphQLContext,
        email: String,
        password: String,
    ) -> FieldResult<UserData> {
        auth_queries::user_login(ctx, email, password).await
    }

    #[graphql(name = "AdminLogin")]
    async fn admin_login(
        ctx: &GraphQLContext,
        email: String,
        password: String,
    ) -> FieldResult<UserData> {
        auth_queries::admin_login(ctx, email, password).await
    }

    #[graphql(name = "SuperAdminLogin")]
    async fn super_admin_login(
        ctx: &GraphQLContext,
        email: String,
        password: String,
    ) -> FieldResult<UserData> {
        auth_queries::super_admin_login(ctx, email, password).await
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// All admins (super admin only)
    #[graphql(name = "GetAllAdmins")]
    async fn get_all_admins(ctx: &GraphQLContext) -> FieldResult<Vec<UserData>> {
        AccessGate::SUPER_ADMIN
            .run(ctx, |req| user_queries::get_all_admins(req))
            .await
    }

    /// All shoppers (admin only)
    #[graphql(name = "GetAllUsers")]
    async fn get_all_users(ctx: &GraphQLContext) -> FieldResult<Vec<UserData>> {
        AccessGate::ADMIN
            .run(ctx, |req| user_queries::get_all_users(req))
            .await
    }

    #[graphql(name = "GetUser")]
    async fn get_user(ctx: &GraphQLContext, id: i32) -> FieldResult<UserData> {
        AccessGate::ADMIN
            .run(ctx, |req| user_queries::get_user(req, id))
            .await
    }

    #[graphql(name = "GetAdmin")]
    async fn get_admin(ctx: &GraphQLContext, id: i32) -> FieldResult<UserData> {
        AccessGate::SUPER_ADMIN
            .run(ctx, |req| user_queries::get_admin(req, id))
            .await
    }

    /// Address of the logged-in user
    #[graphql(name = "GetAddress")]
    async fn get_address(ctx: &GraphQLContext) -> FieldResult<AddressData> {
        AccessGate::USER
            .run(ctx, |req| user_queries::get_address(req))
            .await
    }

    // =========================================================================
    // Cart, orders, wishlist (scoped to the logged-in user)
    // =========================================================================

    #[graphql(name = "GetAllCartItems")]
    async fn get_all_cart_items(ctx: &GraphQLContext) -> FieldResult<Vec<CartData>> {
        AccessGate::USER
            .run(ctx, |req| cart_queries::get_all_cart_items(req))
            .await
    }

    #[graphql(name = "GetAllOrdersUser")]
    async fn get_all_orders_user(ctx: &GraphQLContext) -> FieldResult<Vec<OrderData>> {
        AccessGate::USER
            .run(ctx, |req| order_queries::get_all_orders_user(req))
            .await
    }

    /// Every order in the store (admin only)
    #[graphql(name = "GetAllOrders")]
    async fn get_all_orders(ctx: &GraphQLContext) -> FieldResult<Vec<OrderData>> {
        AccessGate::ADMIN
            .run(ctx, |req| order_queries::get_all_orders(req))
            .await
    }

    #[graphql(name = "GetOrder")]
    async fn get_order(ctx: &GraphQLContext, order_id: i32) -> FieldResult<OrderData> {
        AccessGate::USER
            .run(ctx, |req| order_queries::get_order(req, order_id))
            .await
    }

    #[graphql(name = "GetAllWishlist")]
    async fn get_all_wishlist(ctx: &GraphQLContext) -> FieldResult<Vec<WishlistData>> {
        AccessGate::USER
            .run(ctx, |req| wishlist_queries::get_all_wishlist(req))
            .await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Catalog (admin)
    // =========================================================================

    #[graphql(name = "AddProduct")]
    async fn add_product(
        ctx: &GraphQLContext,
        name: String,
        price: i32,
        quantity: i32,
    ) -> FieldResult<ProductData> {
        AccessGate::ADMIN
            .run(ctx, |req| {
                product_mutations::add_product(req, name, price, quantity)
            })
            .await
    }

    /// Add (`increase: true`) or remove stock
    #[graphql(name = "UpdateQuantity")]
    async fn update_quantity(
        ctx: &GraphQLContext,
        id: ID,
        quantity: i32,
        increase: bool,
    ) -> FieldResult<ProductData> {
        AccessGate::ADMIN
            .run(ctx, |req| {
                product_mutations::update_quantity(req, id, quantity, increase)
            })
            .await
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Create an account with its cart and wishlist
    #[graphql(name = "UserSignup")]
    async fn user_signup(
        ctx: &GraphQLContext,
        name: String,
        email: String,
        password: String,
    ) -> FieldResult<UserData> {
        user_mutations::user_signup(ctx, name, email, password).await
    }

    #[graphql(name = "AddAdmin")]
    async fn add_admin(
        ctx: &GraphQLContext,
        name: String,
        email: String,
        password: String,
    ) -> FieldResult<UserData> {
        AccessGate::SUPER_ADMIN
            .run(ctx, |req| user_mutations::add_admin(req, name, email, password))
            .await
    }

    #[graphql(name = "AddAddress")]
    async fn add_address(
        ctx: &GraphQLContext,
        city: String,
        district: String,
        state: String,
        road: String,
    ) -> FieldResult<AddressData> {
        AccessGate::USER
            .run(ctx, |req| {
                user_mutations::add_address(req, city, district, state, road)
            })
            .await
    }

    #[graphql(name = "RemoveAddress")]
    async fn remove_address(ctx: &GraphQLContext) -> FieldResult<AddressData> {
        AccessGate::USER
            .run(ctx, |req| user_mutations::remove_address(req))
            .await
    }

    /// Drop the session cookie
    #[graphql(name = "Logout")]
    async fn logout(ctx: &GraphQLContext) -> FieldResult<bool> {
        auth_mutations::logout(ctx).await
    }

    // =========================================================================
    // Cart, orders, wishlist (scoped to the logged-in user)
    // =========================================================================

    #[graphql(name = "AddToCart")]
    async fn add_to_cart(
        ctx: &GraphQLContext,
        product_id: i32,
        quantity: i32,
    ) -> FieldResult<CartData> {
        AccessGate::USER
            .run(ctx, |req| cart_mutations::add_to_cart(req, product_id, quantity))
            .await
    }

    #[graphql(name = "RemoveFromCart")]
    async fn remove_from_cart(ctx: &GraphQLContext, product_id: i32) -> FieldResult<CartData> {
        AccessGate::USER
            .run(ctx, |req| cart_mutations::remove_from_cart(req, product_id))
            .await
    }

    /// Order everything in the cart
    #[graphql(name = "OrderAll")]
    async fn order_all(ctx: &GraphQLContext) -> FieldResult<OrderData> {
        AccessGate::USER
            .run(ctx, |req| order_mutations::order_all(req))
            .await
    }

    #[graphql(name = "UserCancelOrder")]
    async fn user_cancel_order(ctx: &GraphQLContext, order_id: i32) -> FieldResult<OrderData> {
        AccessGate::USER
            .run(ctx, |req| order_mutations::user_cancel_order(req, order_id))
            .await
    }

    #[graphql(name = "ChangeOrderStatus")]
    async fn change_order_status(
        ctx: &GraphQLContext,
        order_id: i32,
        status_id: i32,
    ) -> FieldResult<OrderData> {
        AccessGate::ADMIN
            .run(ctx, |req| {
                order_mutations::change_order_status(req, order_id, status_id)
            })
            .await
    }

    #[graphql(name = "AddToWishList")]
    async fn add_to_wishlist(ctx: &GraphQLContext, product_id: i32) -> FieldResult<WishlistData> {
        AccessGate::USER
            .run(ctx, |req| wishlist_mutations::add_to_wishlist(req, product_id))
            .await
    }

    #[graphql(name = "RemoveFromWishlist")]
    async fn remove_from_wishlist(
        ctx: &GraphQLContext,
        product_id: i32,
    ) -> FieldResult<WishlistData> {
        AccessGate::USER
            .run(ctx, |req| {
                wishlist_mutations::remove_from_wishlist(req, product_id)
            })
            .await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
