//! Products domain - the catalog.

pub mod data;
pub mod edges;
pub mod models;

pub use data::ProductData;
