use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::orders::data::OrderData;
use crate::domains::orders::models::OrderRef;
use crate::server::graphql::RequestIdentity;

/// Orders placed by the requesting user
pub async fn get_all_orders_user(req: RequestIdentity<'_>) -> FieldResult<Vec<OrderData>> {
    let orders = req
        .backends()
        .collect("order", req.deps.orders.get_all_orders_user(req.subject_id()))
        .await
        .map_err(to_field_error)?;

    Ok(orders.into_iter().map(OrderData::from).collect())
}

/// Every order in the store
pub async fn get_all_orders(req: RequestIdentity<'_>) -> FieldResult<Vec<OrderData>> {
    let orders = req
        .backends()
        .collect("order", req.deps.orders.get_all_orders())
        .await
        .map_err(to_field_error)?;

    Ok(orders.into_iter().map(OrderData::from).collect())
}

pub async fn get_order(req: RequestIdentity<'_>, order_id: i32) -> FieldResult<OrderData> {
    let order = OrderRef::parse(order_id, req.subject_id()).map_err(to_field_error)?;

    req.backends()
        .call("order", req.deps.orders.get_order(order))
        .await
        .map(OrderData::from)
        .map_err(to_field_error)
}
