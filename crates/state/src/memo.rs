use std::sync::Arc;

use product_context_catalog::{Product, Query};
use product_context_core::ItemId;
use product_context_events::{PixelEvent, RenderEnvironment, build_pixel_events};

#[derive(Debug, Clone, PartialEq)]
struct PixelKey {
    account: String,
    product: Option<Arc<Product>>,
    sku_id: Option<ItemId>,
}

/// Pixel events memoized on `(account, product, skuId)`.
///
/// Query parameters other than `skuId` are not part of the key.
#[derive(Debug, Clone)]
pub struct PixelMemo {
    key: Option<PixelKey>,
    events: Arc<[PixelEvent]>,
    generation: u64,
}

impl Default for PixelMemo {
    fn default() -> Self {
        Self {
            key: None,
            events: Arc::from(Vec::new()),
            generation: 0,
        }
    }
}

impl PixelMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current events, rebuilding them if the key changed.
    ///
    /// Returns `true` alongside the events when they were rebuilt. A product
    /// the builder rejects is logged and memoized as an empty sequence.
    pub fn events(
        &mut self,
        account: &str,
        product: Option<&Arc<Product>>,
        query: &Query,
        environment: &RenderEnvironment,
    ) -> (Arc<[PixelEvent]>, bool) {
        let key = PixelKey {
            account: account.to_string(),
            product: product.cloned(),
            sku_id: query.sku_id.clone(),
        };
        if self.key.as_ref() == Some(&key) {
            tracing::trace!(generation = self.generation, "pixel events unchanged");
            return (Arc::clone(&self.events), false);
        }

        let events = match build_pixel_events(product.map(Arc::as_ref), query, account, environment) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(error = %err, "skipping pixel events for product");
                Vec::new()
            }
        };

        self.key = Some(key);
        self.events = events.into();
        self.generation += 1;
        (Arc::clone(&self.events), true)
    }

    /// Number of times the events were rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_context_catalog::Item;

    fn browser() -> RenderEnvironment {
        RenderEnvironment::Browser {
            page_url: "https://shop.example/p".to_string(),
        }
    }

    fn product() -> Arc<Product> {
        Arc::new(Product::new("1").with_item(Item::new("A")).with_item(Item::new("B")))
    }

    #[test]
    fn same_key_reuses_events() {
        let mut memo = PixelMemo::new();
        let product = product();
        let query = Query::new();

        let (first, rebuilt) = memo.events("acct", Some(&product), &query, &browser());
        assert!(rebuilt);
        assert_eq!(first.len(), 2);

        let with_other_params = Query::parse("utm_source=mail");
        let (second, rebuilt) = memo.events("acct", Some(&product), &with_other_params, &browser());
        assert!(!rebuilt);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.generation(), 1);
    }

    #[test]
    fn sku_account_or_product_change_rebuilds() {
        let mut memo = PixelMemo::new();
        let product = product();

        memo.events("acct", Some(&product), &Query::new(), &browser());
        assert!(memo.events("acct", Some(&product), &Query::new().with_sku_id("B"), &browser()).1);
        assert!(memo.events("other", Some(&product), &Query::new().with_sku_id("B"), &browser()).1);

        let renamed = Arc::new(Product {
            product_name: Some("Renamed".into()),
            ..(*product).clone()
        });
        assert!(memo.events("other", Some(&renamed), &Query::new().with_sku_id("B"), &browser()).1);
        assert_eq!(memo.generation(), 4);
    }

    #[test]
    fn rejected_product_memoizes_empty_events() {
        let mut memo = PixelMemo::new();
        let empty = Arc::new(Product::new("9"));

        let (events, rebuilt) = memo.events("acct", Some(&empty), &Query::new(), &browser());
        assert!(rebuilt);
        assert!(events.is_empty());
    }
}
