use juniper::GraphQLObject;

use crate::domains::wishlist::models::WishlistRecord;

#[derive(Debug, Clone, PartialEq, GraphQLObject)]
#[graphql(name = "wishlist")]
pub struct WishlistData {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
}

impl From<WishlistRecord> for WishlistData {
    fn from(item: WishlistRecord) -> Self {
        Self {
            id: item.id as i32,
            product_id: item.product_id as i32,
            user_id: item.user_id as i32,
        }
    }
}
