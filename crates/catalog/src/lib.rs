//! Product records as delivered by the storefront catalog, plus the rules for
//! picking the initially selected SKU.
//!
//! Everything here is deterministic and side-effect free (no IO, no rendering).

pub mod product;
pub mod query;
pub mod selection;

pub use product::{
    CategoryNode, CommercialOffer, Item, Product, ProductQuery, ReferenceId, Seller,
};
pub use query::Query;
pub use selection::{find_available_item, find_item_by_id, resolve_initial_item};
