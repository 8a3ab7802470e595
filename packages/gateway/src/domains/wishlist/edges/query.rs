use juniper::FieldResult;

use crate::common::to_field_error;
use crate::domains::wishlist::data::WishlistData;
use crate::server::graphql::RequestIdentity;

pub async fn get_all_wishlist(req: RequestIdentity<'_>) -> FieldResult<Vec<WishlistData>> {
    let items = req
        .backends()
        .collect(
            "wishlist",
            req.deps.wishlists.get_all_wishlist_items(req.subject_id()),
        )
        .await
        .map_err(to_field_error)?;

    Ok(items.into_iter().map(WishlistData::from).collect())
}
