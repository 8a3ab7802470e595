use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::orders::data::OrderData;
use crate::domains::orders::models::{OrderRef, StatusChange};
use crate::server::graphql::RequestIdentity;

/// Turn the requesting user's cart into an order
pub async fn order_all(req: RequestIdentity<'_>) -> FieldResult<OrderData> {
    req.backends()
        .call("order", req.deps.orders.order_all(req.subject_id()))
        .await
        .map(OrderData::from)
        .map_err(to_field_error)
}

pub async fn user_cancel_order(req: RequestIdentity<'_>, order_id: i32) -> FieldResult<OrderData> {
    let order = OrderRef::parse(order_id, req.subject_id()).map_err(to_field_error)?;

    req.backends()
        .call("order", req.deps.orders.user_cancel_order(order))
        .await
        .map(OrderData::from)
        .map_err(to_field_error)
}

pub async fn change_order_status(
    req: RequestIdentity<'_>,
    order_id: i32,
    status_id: i32,
) -> FieldResult<OrderData> {
    let change = StatusChange::parse(order_id, status_id).map_err(to_field_error)?;

    req.backends()
        .call("order", req.deps.orders.change_order_status(change))
        .await
        .map(OrderData::from)
        .map_err(to_field_error)
}
