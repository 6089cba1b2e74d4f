//! `product-context-core` — building blocks shared by the product page state crates.
//!
//! This crate contains **pure** primitives (no rendering, no transport concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod reducer;

pub use entity::{Entity, find_by_id};
pub use error::ContextError;
pub use id::{CategoryId, DispatchId, ItemId, ProductId, SellerId};
pub use reducer::{Reducer, reduce_all};
