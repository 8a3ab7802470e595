use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::cart::data::CartData;
use crate::server::graphql::RequestIdentity;

/// Lines in the requesting user's cart
pub async fn get_all_cart_items(req: RequestIdentity<'_>) -> FieldResult<Vec<CartData>> {
    let lines = req
        .backends()
        .collect("cart", req.deps.carts.get_all_cart_items(req.subject_id()))
        .await
        .map_err(to_field_error)?;

    Ok(lines.into_iter().map(CartData::from).collect())
}
