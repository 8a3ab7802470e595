use serde::{Deserialize, Serialize};

use crate::common::errors::{require_id, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub product_id: u32,
    pub user_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub user_id: u32,
    pub product_id: u32,
}

impl WishlistItem {
    pub fn parse(user_id: u32, product_id: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            product_id: require_id("productId", product_id)?,
        })
    }
}
