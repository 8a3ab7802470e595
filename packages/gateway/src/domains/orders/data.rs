use juniper::GraphQLObject;

use crate::domains::orders::models::OrderRecord;
use crate::domains::products::data::ProductData;

#[derive(Debug, Clone, PartialEq, GraphQLObject)]
#[graphql(name = "Order")]
pub struct OrderData {
    pub order_id: i32,
    pub order_items: Vec<ProductData>,
    pub address_id: i32,
    pub order_status_id: i32,
    pub payment_type_id: i32,
    pub total: f64,
}

impl From<OrderRecord> for OrderData {
    fn from(order: OrderRecord) -> Self {
        Self {
            order_id: order.order_id as i32,
            order_items: order.order_items.into_iter().map(ProductData::from).collect(),
            address_id: order.address_id as i32,
            order_status_id: order.order_status_id as i32,
            payment_type_id: order.payment_type_id as i32,
            total: order.total,
        }
    }
}
