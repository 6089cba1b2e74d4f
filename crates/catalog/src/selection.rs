//! Initial SKU selection.
//!
//! Absence is always `None`; none of these lookups fail.

use product_context_core::{ItemId, find_by_id};

use crate::product::Item;
use crate::query::Query;

/// First item that has at least one seller with stock.
pub fn find_available_item(items: &[Item]) -> Option<&Item> {
    items.iter().find(|item| item.is_available())
}

/// Exact match on `itemId`.
pub fn find_item_by_id<'a>(id: &ItemId, items: &'a [Item]) -> Option<&'a Item> {
    find_by_id(id, items)
}

/// Item a product page starts with.
///
/// An explicit `skuId` wins and is never second-guessed: if it names no item
/// the result is `None`. Without one, the first available item is chosen,
/// falling back to the first item.
pub fn resolve_initial_item<'a>(query: &Query, items: &'a [Item]) -> Option<&'a Item> {
    match &query.sku_id {
        Some(sku_id) => find_item_by_id(sku_id, items),
        None => find_available_item(items).or_else(|| items.first()),
    }
}
