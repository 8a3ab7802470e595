use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::wishlist::data::WishlistData;
use crate::domains::wishlist::models::WishlistItem;
use crate::server::graphql::RequestIdentity;

pub async fn add_to_wishlist(req: RequestIdentity<'_>, product_id: i32) -> FieldResult<WishlistData> {
    let item = WishlistItem::parse(req.subject_id(), product_id).map_err(to_field_error)?;

    req.backends()
        .call("wishlist", req.deps.wishlists.add_to_wishlist(item))
        .await
        .map(WishlistData::from)
        .map_err(to_field_error)
}

pub async fn remove_from_wishlist(
    req: RequestIdentity<'_>,
    product_id: i32,
) -> FieldResult<WishlistData> {
    let item = WishlistItem::parse(req.subject_id(), product_id).map_err(to_field_error)?;

    req.backends()
        .call("wishlist", req.deps.wishlists.remove_from_wishlist(item))
        .await
        .map(WishlistData::from)
        .map_err(to_field_error)
}
