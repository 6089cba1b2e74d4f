//! Construction of the pixel payload for a product view.

use serde::{Deserialize, Serialize};

use product_context_catalog::{Product, Query};
use product_context_core::ItemId;

use crate::error::PixelError;
use crate::event::{PageInfoEvent, PixelEvent, ProductViewEvent};

const EVENT_TYPE_PRODUCT_VIEW: &str = "productView";
const PAGE_CATEGORY_PRODUCT: &str = "Product";

/// Where the page is being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderEnvironment {
    /// Server-side render: there is no document, so nothing is tracked.
    Server,
    /// Rendered in a browser at `page_url`.
    Browser { page_url: String },
}

impl RenderEnvironment {
    pub fn page_url(&self) -> Option<&str> {
        match self {
            RenderEnvironment::Server => None,
            RenderEnvironment::Browser { page_url } => Some(page_url),
        }
    }
}

/// Build the `pageInfo` + `productView` events for a product view.
///
/// Returns no events when there is no product yet or when rendering on the
/// server. The `productView` event carries a copy of `product` annotated with
/// the resolved SKU; `product` itself is left untouched.
///
/// The SKU is `query.skuId` when present, else the product's first item. A
/// product with no items and no `skuId` has nothing to resolve and yields
/// [`PixelError::NoItems`].
pub fn build_pixel_events(
    product: Option<&Product>,
    query: &Query,
    account_name: &str,
    environment: &RenderEnvironment,
) -> Result<Vec<PixelEvent>, PixelError> {
    let (Some(product), Some(page_url)) = (product, environment.page_url()) else {
        return Ok(Vec::new());
    };

    let sku_id = resolve_sku_id(product, query)?;
    let sku = product.items.iter().find(|item| item.item_id == sku_id);

    let department = product.department();
    let mut page_info = PageInfoEvent {
        event_type: EVENT_TYPE_PRODUCT_VIEW.to_string(),
        account_name: account_name.to_string(),
        page_category: PAGE_CATEGORY_PRODUCT.to_string(),
        page_department: department.map(|c| c.name.clone()).unwrap_or_default(),
        page_facets: Vec::new(),
        page_title: product.title_tag.clone(),
        page_url: page_url.to_string(),
        product_brand_name: product.brand.clone(),
        product_category_id: product
            .category_id
            .as_ref()
            .and_then(|id| js_number(id.as_str())),
        product_category_name: product
            .leaf_category()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        product_department_id: department
            .map(|c| c.id.to_string())
            .unwrap_or_default(),
        product_department_name: department.map(|c| c.name.clone()).unwrap_or_default(),
        product_id: product.product_id.clone(),
        product_name: product.product_name.clone(),
        sku_stock_out_from_product_detail: Vec::new(),
        sku_stock_out_from_shelf: Vec::new(),
        product_eans: vec![sku.and_then(|item| item.ean.clone())],
        product_reference_id: None,
        product_list_price_from: None,
        product_list_price_to: None,
        product_price_from: None,
        product_price_to: None,
        seller_id: None,
        seller_ids: None,
    };

    if let Some(reference) = sku.and_then(|item| item.reference_id.first()) {
        page_info.product_reference_id = reference.value.clone();
    }

    if let Some(seller) = sku.and_then(|item| item.sellers.first()) {
        let offer = &seller.commercial_offer;
        let list_price = offer.list_price.map(js_number_text);
        let price = offer.price.map(js_number_text);

        page_info.product_list_price_from = list_price.clone();
        page_info.product_list_price_to = list_price;
        page_info.product_price_from = price.clone();
        page_info.product_price_to = price;
        page_info.seller_id = Some(seller.seller_id.to_string());
        page_info.seller_ids = Some(seller.seller_id.to_string());
    }

    Ok(vec![
        PixelEvent::PageInfo(page_info),
        PixelEvent::ProductView(ProductViewEvent {
            product: product.with_selected_sku(sku_id),
        }),
    ])
}

fn resolve_sku_id(product: &Product, query: &Query) -> Result<ItemId, PixelError> {
    if let Some(sku_id) = &query.sku_id {
        return Ok(sku_id.clone());
    }
    product
        .items
        .first()
        .map(|item| item.item_id.clone())
        .ok_or_else(|| PixelError::NoItems {
            product_id: product.product_id.clone(),
        })
}

/// Numeric value of `text` the way `Number(text)` reads it, as a JSON number.
///
/// Blank text is 0. Text that is not a finite number has no JSON form.
fn js_number(text: &str) -> Option<serde_json::Number> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.into());
    }
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return Some((value as i64).into());
    }
    serde_json::Number::from_f64(value)
}

/// Text form of a number as a browser would print it (`100`, `99.9`,
/// `1e+21`).
pub fn js_number_text(value: f64) -> String {
    if value == 0.0 {
        // Covers -0, which Rust would print with its sign.
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    value.to_string()
}
