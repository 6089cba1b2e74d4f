use std::sync::Arc;

use serde::Serialize;

use product_context_catalog::{Item, Product, Query, find_item_by_id, resolve_initial_item};
use product_context_core::Reducer;

use crate::action::ProductAction;

/// Progress of the SKU selector (color, size, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuSelector {
    pub are_all_variations_selected: bool,
}

/// State shared with everything rendered under a product page.
///
/// `selected_item`, when set, is always one of `product.items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductState {
    pub selected_item: Option<Item>,
    pub product: Option<Arc<Product>>,
    pub categories: Option<Vec<String>>,
    pub selected_quantity: u32,
    pub sku_selector: SkuSelector,
}

impl ProductState {
    /// State a page starts with: quantity 1, variations not yet chosen, and
    /// the item picked from the query (or by availability).
    pub fn initial(product: Option<Arc<Product>>, query: &Query) -> Self {
        let items = product.as_deref().map(|p| p.items.as_slice()).unwrap_or(&[]);

        Self {
            selected_item: resolve_initial_item(query, items).cloned(),
            categories: product.as_ref().and_then(|p| p.categories.clone()),
            product,
            selected_quantity: 1,
            sku_selector: SkuSelector::default(),
        }
    }

    pub fn selected_item_id(&self) -> Option<&product_context_core::ItemId> {
        self.selected_item.as_ref().map(|item| &item.item_id)
    }

    fn items(&self) -> &[Item] {
        self.product.as_deref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }
}

impl Reducer for ProductState {
    type Action = ProductAction;

    fn reduce(&self, action: &ProductAction) -> Self {
        match action {
            ProductAction::SetQuantity { quantity } => Self {
                selected_quantity: *quantity,
                ..self.clone()
            },
            ProductAction::SkuSelectorSetVariationsSelected { all_selected } => Self {
                sku_selector: SkuSelector {
                    are_all_variations_selected: *all_selected,
                },
                ..self.clone()
            },
            // An unknown id clears the selection; a later valid id restores it.
            ProductAction::SetSelectedItem { id } => Self {
                selected_item: find_item_by_id(id, self.items()).cloned(),
                ..self.clone()
            },
            ProductAction::Unknown(_) => self.clone(),
        }
    }
}
