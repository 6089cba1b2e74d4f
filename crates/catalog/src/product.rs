use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use product_context_core::{CategoryId, Entity, ItemId, ProductId, SellerId};

// Catalog responses send `null` for lists and objects they have no data for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Node of a product's category tree (root first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
}

/// Reference code attached to an item (`{Key, Value}` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceId {
    #[serde(rename = "Key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

/// Commercial offer of a seller for one item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommercialOffer {
    #[serde(rename = "Price", default)]
    pub price: Option<f64>,
    #[serde(rename = "ListPrice", default)]
    pub list_price: Option<f64>,
    #[serde(rename = "AvailableQuantity", default)]
    pub available_quantity: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommercialOffer {
    pub fn is_available(&self) -> bool {
        self.available_quantity.is_some_and(|qty| qty > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: SellerId,
    // The storefront API spells it this way.
    #[serde(rename = "commertialOffer", default, deserialize_with = "null_as_default")]
    pub commercial_offer: CommercialOffer,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Seller {
    pub fn new(seller_id: impl Into<SellerId>, commercial_offer: CommercialOffer) -> Self {
        Self {
            seller_id: seller_id.into(),
            commercial_offer,
            extra: Map::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.commercial_offer.is_available()
    }
}

/// One purchasable variant (SKU) of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: ItemId,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference_id: Vec<ReferenceId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sellers: Vec<Seller>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: item_id.into(),
            ean: None,
            reference_id: Vec::new(),
            sellers: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_ean(mut self, ean: impl Into<String>) -> Self {
        self.ean = Some(ean.into());
        self
    }

    pub fn with_reference(mut self, value: impl Into<String>) -> Self {
        self.reference_id.push(ReferenceId {
            key: None,
            value: Some(value.into()),
        });
        self
    }

    pub fn with_seller(mut self, seller: Seller) -> Self {
        self.sellers.push(seller);
        self
    }

    /// At least one seller has stock.
    pub fn is_available(&self) -> bool {
        self.sellers.iter().any(Seller::is_available)
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.item_id
    }
}

/// Product record as received from the catalog.
///
/// Fields the page logic does not read are kept in `extra` so that the record
/// forwarded to analytics is the record that was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub title_tag: Option<String>,
    #[serde(default)]
    pub meta_tag_description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_tree: Option<Vec<CategoryNode>>,
    /// Category paths such as `"/Shoes/Sneakers/"`.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_sku: Option<ItemId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: None,
            title_tag: None,
            meta_tag_description: None,
            brand: None,
            category_id: None,
            category_tree: None,
            categories: None,
            items: Vec::new(),
            selected_sku: None,
            extra: Map::new(),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_category_tree(mut self, tree: Vec<CategoryNode>) -> Self {
        self.category_tree = Some(tree);
        self
    }

    /// Copy of this record annotated with the SKU a page resolved for it.
    pub fn with_selected_sku(&self, sku: ItemId) -> Self {
        Self {
            selected_sku: Some(sku),
            ..self.clone()
        }
    }

    /// Root of the category tree (the department).
    pub fn department(&self) -> Option<&CategoryNode> {
        self.category_tree.as_deref().and_then(<[_]>::first)
    }

    /// Leaf of the category tree.
    pub fn leaf_category(&self) -> Option<&CategoryNode> {
        self.category_tree.as_deref().and_then(<[_]>::last)
    }
}

/// Result of the product data fetch: the record (once resolved) and whether
/// the fetch is still in flight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub loading: bool,
}

impl ProductQuery {
    pub fn loaded(product: Product) -> Self {
        Self {
            product: Some(product),
            loading: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            product: None,
            loading: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn storefront_json() -> Value {
        json!({
            "productId": "16",
            "productName": "Classic Sneaker",
            "titleTag": "Classic Sneaker | Store",
            "metaTagDescription": "A timeless sneaker",
            "brand": "Acme",
            "categoryId": "2",
            "categoryTree": [{"id": "1", "name": "Shoes"}, {"id": "2", "name": "Sneakers"}],
            "categories": ["/Shoes/Sneakers/", "/Shoes/"],
            "linkText": "classic-sneaker",
            "items": [{
                "itemId": "A",
                "name": "Classic Sneaker 42",
                "ean": "111",
                "referenceId": [{"Key": "RefId", "Value": "R1"}],
                "sellers": [{
                    "sellerId": "1",
                    "sellerName": "Main store",
                    "commertialOffer": {"Price": 100, "ListPrice": 120, "AvailableQuantity": 5, "Tax": 0}
                }]
            }]
        })
    }

    #[test]
    fn deserializes_storefront_record() {
        let product: Product = serde_json::from_value(storefront_json()).unwrap();

        assert_eq!(product.product_id, "16");
        assert_eq!(product.department().map(|c| c.name.as_str()), Some("Shoes"));
        assert_eq!(product.leaf_category().map(|c| c.name.as_str()), Some("Sneakers"));

        let item = &product.items[0];
        assert_eq!(item.ean.as_deref(), Some("111"));
        assert_eq!(item.reference_id[0].value.as_deref(), Some("R1"));
        assert_eq!(item.sellers[0].commercial_offer.price, Some(100.0));
        assert!(item.is_available());
        assert_eq!(product.extra.get("linkText"), Some(&json!("classic-sneaker")));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let product: Product = serde_json::from_value(storefront_json()).unwrap();
        let back = serde_json::to_value(&product).unwrap();

        assert_eq!(back["linkText"], json!("classic-sneaker"));
        assert_eq!(back["items"][0]["sellers"][0]["sellerName"], json!("Main store"));
        assert_eq!(back["items"][0]["sellers"][0]["commertialOffer"]["Tax"], json!(0));
        assert!(back.get("selectedSku").is_none());
    }

    #[test]
    fn null_lists_read_as_empty() {
        let product: Product = serde_json::from_value(json!({
            "productId": "1",
            "items": [{
                "itemId": "A",
                "referenceId": null,
                "sellers": [{"sellerId": "1", "commertialOffer": null}]
            }, {
                "itemId": "B",
                "sellers": null
            }]
        }))
        .unwrap();

        assert!(product.items[0].reference_id.is_empty());
        assert_eq!(product.items[0].sellers[0].commercial_offer, CommercialOffer::default());
        assert!(product.items[1].sellers.is_empty());
        assert!(!product.items[1].is_available());
    }

    #[test]
    fn null_items_read_as_no_items() {
        let product: Product =
            serde_json::from_value(json!({"productId": "1", "items": null})).unwrap();
        assert!(product.items.is_empty());
    }

    #[test]
    fn seller_without_offer_is_unavailable() {
        let seller: Seller = serde_json::from_value(json!({"sellerId": "1"})).unwrap();
        assert!(!seller.is_available());
    }

    #[test]
    fn with_selected_sku_leaves_original_untouched() {
        let product = Product::new("1").with_item(Item::new("A"));
        let annotated = product.with_selected_sku(ItemId::new("A"));

        assert_eq!(annotated.selected_sku, Some(ItemId::new("A")));
        assert_eq!(product.selected_sku, None);
        assert_eq!(annotated.items, product.items);
    }

    #[test]
    fn empty_category_tree_has_no_department() {
        let product = Product::new("1").with_category_tree(Vec::new());
        assert!(product.department().is_none());
        assert!(product.leaf_category().is_none());
    }
}
