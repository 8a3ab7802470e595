//! Orders domain - checkout and order status.

pub mod data;
pub mod edges;
pub mod models;

pub use data::OrderData;
