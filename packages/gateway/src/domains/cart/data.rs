use juniper::GraphQLObject;

use crate::domains::cart::models::CartRecord;

#[derive(Debug, Clone, PartialEq, GraphQLObject)]
#[graphql(name = "cart")]
pub struct CartData {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total: f64,
}

impl From<CartRecord> for CartData {
    fn from(cart: CartRecord) -> Self {
        Self {
            id: cart.id as i32,
            user_id: cart.user_id as i32,
            product_id: cart.product_id as i32,
            quantity: cart.quantity,
            total: cart.total,
        }
    }
}
