use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::cart::data::CartData;
use crate::domains::cart::models::{CartLine, CartLineRef};
use crate::server::graphql::RequestIdentity;

pub async fn add_to_cart(
    req: RequestIdentity<'_>,
    product_id: i32,
    quantity: i32,
) -> FieldResult<CartData> {
    let line = CartLine::parse(req.subject_id(), product_id, quantity).map_err(to_field_error)?;

    req.backends()
        .call("cart", req.deps.carts.add_to_cart(line))
        .await
        .map(CartData::from)
        .map_err(to_field_error)
}

pub async fn remove_from_cart(req: RequestIdentity<'_>, product_id: i32) -> FieldResult<CartData> {
    let line = CartLineRef::parse(req.subject_id(), product_id).map_err(to_field_error)?;

    req.backends()
        .call("cart", req.deps.carts.remove_from_cart(line))
        .await
        .map(CartData::from)
        .map_err(to_field_error)
}
