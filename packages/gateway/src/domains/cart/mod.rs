//! Cart domain - one cart per user, holding product lines.

pub mod data;
pub mod edges;
pub mod models;

pub use data::CartData;
