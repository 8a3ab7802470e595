//! Wishlist domain - products a user saved for later.

pub mod data;
pub mod edges;
pub mod models;

pub use data::WishlistData;
