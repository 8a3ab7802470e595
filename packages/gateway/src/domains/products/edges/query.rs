use juniper::FieldResult;

use crate::common::errors::require_id;
use crate::common::to_field_error;
use crate::domains::products::data::ProductData;
use crate::server::graphql::GraphQLContext;

/// Full catalog, in the order the backend streams it
pub async fn products(ctx: &GraphQLContext) -> FieldResult<Vec<ProductData>> {
    let products = ctx
        .backends()
        .collect("product", ctx.deps.products.get_all_products())
        .await
        .map_err(to_field_error)?;

    Ok(products.into_iter().map(ProductData::from).collect())
}

pub async fn product(ctx: &GraphQLContext, id: i32) -> FieldResult<ProductData> {
    let id = require_id("id", id).map_err(to_field_error)?;

    ctx.backends()
        .call("product", ctx.deps.products.get_product(id))
        .await
        .map(ProductData::from)
        .map_err(to_field_error)
}
