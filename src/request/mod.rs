//! Types for request parameters.

mod store_item;

pub use store_item::{StoreItem, parse_store_items};
