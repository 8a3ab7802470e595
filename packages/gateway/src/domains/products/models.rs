use juniper::ID;
use serde::{Deserialize, Serialize};

use crate::common::errors::{require_positive, require_text, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: u32,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
    /// Line total, only set when the product is an order item
    #[serde(default)]
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

/// Stock adjustment; `increase = false` removes `quantity` units
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityChange {
    pub id: u32,
    pub quantity: i32,
    pub increase: bool,
}

impl NewProduct {
    pub fn parse(name: String, price: i32, quantity: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", name)?,
            price: require_positive("price", price)?,
            quantity: require_positive("quantity", quantity)?,
        })
    }
}

impl QuantityChange {
    pub fn parse(id: ID, quantity: i32, increase: bool) -> Result<Self, ValidationError> {
        let id = id.trim().parse::<u32>().map_err(|_| ValidationError::InvalidValue {
            field: "id",
            reason: "must be a non-negative integer",
        })?;

        Ok(Self {
            id,
            quantity: require_positive("quantity", quantity)?,
            increase,
        })
    }
}
