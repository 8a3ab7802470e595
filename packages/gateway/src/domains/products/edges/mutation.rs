use juniper::{FieldResult, ID};

use crate::common::to_field_error;
use crate::domains::products::data::ProductData;
use crate::domains::products::models::{NewProduct, QuantityChange};
use crate::server::graphql::RequestIdentity;

pub async fn add_product(
    req: RequestIdentity<'_>,
    name: String,
    price: i32,
    quantity: i32,
) -> FieldResult<ProductData> {
    let product = NewProduct::parse(name, price, quantity).map_err(to_field_error)?;

    req.backends()
        .call("product", req.deps.products.add_product(product))
        .await
        .map(ProductData::from)
        .map_err(to_field_error)
}

/// Add or remove stock
pub async fn update_quantity(
    req: RequestIdentity<'_>,
    id: ID,
    quantity: i32,
    increase: bool,
) -> FieldResult<ProductData> {
    let change = QuantityChange::parse(id, quantity, increase).map_err(to_field_error)?;

    req.backends()
        .call("product", req.deps.products.update_quantity(change))
        .await
        .map(ProductData::from)
        .map_err(to_field_error)
}
