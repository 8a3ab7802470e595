use serde::{Deserialize, Serialize};

use crate::common::errors::{require_id, ValidationError};
use crate::domains::products::models::ProductRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: u32,
    #[serde(default)]
    pub order_items: Vec<ProductRecord>,
    #[serde(default)]
    pub address_id: u32,
    #[serde(default)]
    pub order_status_id: u32,
    #[serde(default)]
    pub payment_type_id: u32,
    #[serde(default)]
    pub total: f64,
}

/// Order lookup scoped to the requesting user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub order_id: u32,
    pub user_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub order_id: u32,
    pub status_id: u32,
}

impl OrderRef {
    pub fn parse(order_id: i32, user_id: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            order_id: require_id("orderId", order_id)?,
            user_id,
        })
    }
}

impl StatusChange {
    pub fn parse(order_id: i32, status_id: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            order_id: require_id("orderId", order_id)?,
            status_id: require_id("statusId", status_id)?,
        })
    }
}
