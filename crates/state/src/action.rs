use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use product_context_core::ItemId;

/// Updates descendants may request on a product page's state.
///
/// On the wire an action is `{"type": "SET_QUANTITY", "args": {"quantity": 2}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "args", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductAction {
    SetQuantity {
        quantity: u32,
    },
    SkuSelectorSetVariationsSelected {
        #[serde(rename = "allSelected")]
        all_selected: bool,
    },
    SetSelectedItem {
        id: ItemId,
    },
    /// Anything else; applying it changes nothing.
    #[serde(skip)]
    Unknown(String),
}

impl ProductAction {
    /// Parse an action from its JSON form.
    ///
    /// Never fails: an unrecognized `type`, or a recognized one with malformed
    /// `args`, becomes [`ProductAction::Unknown`].
    pub fn from_json(value: JsonValue) -> Self {
        let action_type = value
            .get("type")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();

        match serde_json::from_value(value) {
            Ok(action) => action,
            Err(err) => {
                tracing::debug!(action_type = %action_type, error = %err, "ignoring unrecognized product action");
                ProductAction::Unknown(action_type)
            }
        }
    }

    /// Wire name of the action (`"SET_QUANTITY"`, ...).
    pub fn action_type(&self) -> &str {
        match self {
            ProductAction::SetQuantity { .. } => "SET_QUANTITY",
            ProductAction::SkuSelectorSetVariationsSelected { .. } => {
                "SKU_SELECTOR_SET_VARIATIONS_SELECTED"
            }
            ProductAction::SetSelectedItem { .. } => "SET_SELECTED_ITEM",
            ProductAction::Unknown(action_type) => action_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_known_actions() {
        assert_eq!(
            ProductAction::from_json(json!({"type": "SET_QUANTITY", "args": {"quantity": 3}})),
            ProductAction::SetQuantity { quantity: 3 }
        );
        assert_eq!(
            ProductAction::from_json(json!({
                "type": "SKU_SELECTOR_SET_VARIATIONS_SELECTED",
                "args": {"allSelected": true}
            })),
            ProductAction::SkuSelectorSetVariationsSelected { all_selected: true }
        );
        assert_eq!(
            ProductAction::from_json(json!({"type": "SET_SELECTED_ITEM", "args": {"id": "2000534"}})),
            ProductAction::SetSelectedItem { id: "2000534".into() }
        );
    }

    #[test]
    fn unrecognized_type_becomes_unknown() {
        let action = ProductAction::from_json(json!({"type": "SET_ASSEMBLY_OPTIONS", "args": {}}));
        assert_eq!(action, ProductAction::Unknown("SET_ASSEMBLY_OPTIONS".into()));
        assert_eq!(action.action_type(), "SET_ASSEMBLY_OPTIONS");
    }

    #[test]
    fn malformed_args_become_unknown() {
        assert_eq!(
            ProductAction::from_json(json!({"type": "SET_QUANTITY"})),
            ProductAction::Unknown("SET_QUANTITY".into())
        );
        assert_eq!(
            ProductAction::from_json(json!({"type": "SET_QUANTITY", "args": {"quantity": -1}})),
            ProductAction::Unknown("SET_QUANTITY".into())
        );
        assert_eq!(ProductAction::from_json(json!(42)), ProductAction::Unknown(String::new()));
    }

    #[test]
    fn serializes_to_type_and_args() {
        let json = serde_json::to_value(ProductAction::SetSelectedItem { id: "A".into() }).unwrap();
        assert_eq!(json, json!({"type": "SET_SELECTED_ITEM", "args": {"id": "A"}}));
    }
}
