//! Keeps the selected item in step with the page's `skuId`.
//!
//! The initial selection comes from the query at mount. When the URL's
//! `skuId` changes afterwards (in-page navigation), the rule below asks the
//! reducer to move the selection instead of rebuilding the page.

use product_context_catalog::Item;
use product_context_core::{DispatchId, ItemId};

use crate::action::ProductAction;

/// The reconciliation rule on its own.
///
/// Only acts when both a `skuId` and a selection exist and they disagree.
pub fn sync_action(sku_id: Option<&ItemId>, selected_item: Option<&Item>) -> Option<ProductAction> {
    match (sku_id, selected_item) {
        (Some(sku_id), Some(item)) if item.item_id != *sku_id => {
            Some(ProductAction::SetSelectedItem { id: sku_id.clone() })
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SyncInputs {
    sku_id: Option<ItemId>,
    selected_item_id: Option<ItemId>,
    dispatch: DispatchId,
}

/// Re-evaluates [`sync_action`] only when its inputs change.
///
/// Inputs are the `skuId`, the selected item's id and the dispatch handle.
/// Asking again with the same inputs yields nothing, so a pending correction
/// is never queued twice.
#[derive(Debug, Clone, Default)]
pub struct SelectedItemSync {
    last: Option<SyncInputs>,
}

impl SelectedItemSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(
        &mut self,
        sku_id: Option<&ItemId>,
        selected_item: Option<&Item>,
        dispatch: DispatchId,
    ) -> Option<ProductAction> {
        let inputs = SyncInputs {
            sku_id: sku_id.cloned(),
            selected_item_id: selected_item.map(|item| item.item_id.clone()),
            dispatch,
        };
        if self.last.as_ref() == Some(&inputs) {
            return None;
        }
        self.last = Some(inputs);

        sync_action(sku_id, selected_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_dispatches_on_mismatch_only() {
        let a = Item::new("A");
        let sku_b = ItemId::new("B");
        let sku_a = ItemId::new("A");

        assert_eq!(
            sync_action(Some(&sku_b), Some(&a)),
            Some(ProductAction::SetSelectedItem { id: sku_b.clone() })
        );
        assert_eq!(sync_action(Some(&sku_a), Some(&a)), None);
        assert_eq!(sync_action(None, Some(&a)), None);
        assert_eq!(sync_action(Some(&sku_b), None), None);
    }

    #[test]
    fn unchanged_inputs_are_not_reevaluated() {
        let mut sync = SelectedItemSync::new();
        let dispatch = DispatchId::new();
        let a = Item::new("A");
        let sku_b = ItemId::new("B");

        assert!(sync.evaluate(Some(&sku_b), Some(&a), dispatch).is_some());
        assert!(sync.evaluate(Some(&sku_b), Some(&a), dispatch).is_none());
    }

    #[test]
    fn new_dispatch_handle_triggers_reevaluation() {
        let mut sync = SelectedItemSync::new();
        let a = Item::new("A");
        let sku_b = ItemId::new("B");

        assert!(sync.evaluate(Some(&sku_b), Some(&a), DispatchId::new()).is_some());
        assert!(sync.evaluate(Some(&sku_b), Some(&a), DispatchId::new()).is_some());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: feeding the rule's own correction back in settles it,
            /// with at most one SET_SELECTED_ITEM per distinct skuId.
            #[test]
            fn at_most_one_correction_per_sku(
                skus in prop::collection::vec("[A-C]", 1..12),
                renders in 1usize..4,
            ) {
                let mut sync = SelectedItemSync::new();
                let dispatch = DispatchId::new();
                let mut selected = Item::new("A");

                for sku in skus {
                    let sku = ItemId::new(sku);
                    let mut corrections = 0;
                    for _ in 0..renders {
                        if let Some(ProductAction::SetSelectedItem { id }) =
                            sync.evaluate(Some(&sku), Some(&selected), dispatch)
                        {
                            corrections += 1;
                            selected = Item::new(id);
                        }
                    }
                    prop_assert!(corrections <= 1);
                    prop_assert_eq!(&selected.item_id, &sku);
                    prop_assert!(sync.evaluate(Some(&sku), Some(&selected), dispatch).is_none());
                }
            }
        }
    }
}
