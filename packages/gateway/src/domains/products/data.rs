use juniper::GraphQLObject;

use crate::domains::products::models::ProductRecord;

/// Product GraphQL data type
///
/// Also used for order items, where `total` is the line total.
#[derive(Debug, Clone, PartialEq, GraphQLObject)]
#[graphql(name = "product")]
pub struct ProductData {
    pub id: i32,
    pub name: String,
    pub total: i32,
    pub quantity: i32,
    pub price: i32,
}

impl From<ProductRecord> for ProductData {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.id as i32,
            name: product.name,
            total: product.total,
            quantity: product.quantity,
            price: product.price,
        }
    }
}
