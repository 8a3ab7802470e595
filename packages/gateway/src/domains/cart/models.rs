use serde::{Deserialize, Serialize};

use crate::common::errors::{require_id, require_positive, ValidationError};

/// Cart (or one cart line) as returned by the commerce backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    #[serde(default)]
    pub id: u32,
    pub user_id: u32,
    #[serde(default)]
    pub product_id: u32,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub user_id: u32,
    pub product_id: u32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRef {
    pub user_id: u32,
    pub product_id: u32,
}

impl CartLine {
    pub fn parse(user_id: u32, product_id: i32, quantity: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            product_id: require_id("productId", product_id)?,
            quantity: require_positive("quantity", quantity)?,
        })
    }
}

impl CartLineRef {
    pub fn parse(user_id: u32, product_id: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            product_id: require_id("productId", product_id)?,
        })
    }
}
