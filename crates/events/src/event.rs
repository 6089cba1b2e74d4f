use serde::{Deserialize, Serialize};

use product_context_catalog::Product;
use product_context_core::ProductId;

/// An analytics (pixel) event.
///
/// Events are facts: they are built fresh for every product view and never
/// mutated afterwards. On the wire they are flat objects discriminated by
/// their `event` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PixelEvent {
    #[serde(rename = "pageInfo")]
    PageInfo(PageInfoEvent),
    #[serde(rename = "productView")]
    ProductView(ProductViewEvent),
}

impl PixelEvent {
    /// Stable event name (`"pageInfo"`, `"productView"`).
    pub fn event_name(&self) -> &'static str {
        match self {
            PixelEvent::PageInfo(_) => "pageInfo",
            PixelEvent::ProductView(_) => "productView",
        }
    }

    pub fn as_page_info(&self) -> Option<&PageInfoEvent> {
        match self {
            PixelEvent::PageInfo(e) => Some(e),
            PixelEvent::ProductView(_) => None,
        }
    }

    pub fn as_product_view(&self) -> Option<&ProductViewEvent> {
        match self {
            PixelEvent::ProductView(e) => Some(e),
            PixelEvent::PageInfo(_) => None,
        }
    }
}

/// Page-level facts about a product detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoEvent {
    pub event_type: String,
    pub account_name: String,
    pub page_category: String,
    pub page_department: String,
    pub page_facets: Vec<String>,
    pub page_title: Option<String>,
    pub page_url: String,
    pub product_brand_name: Option<String>,
    /// Numeric form of the product's category id (`""` reads as 0); `null`
    /// when not numeric.
    pub product_category_id: Option<serde_json::Number>,
    pub product_category_name: String,
    pub product_department_id: String,
    pub product_department_name: String,
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub sku_stock_out_from_product_detail: Vec<String>,
    pub sku_stock_out_from_shelf: Vec<String>,
    /// Always exactly one entry: the EAN of the resolved SKU, if known.
    pub product_eans: Vec<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_list_price_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_list_price_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_ids: Option<String>,
}

/// The product that was viewed, annotated with the SKU it was viewed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductViewEvent {
    pub product: Product,
}
