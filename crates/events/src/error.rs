use thiserror::Error;

use product_context_core::ProductId;

/// Failure to build the pixel payload for a product.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PixelError {
    /// No `skuId` in the query and the product has no items to default to.
    #[error("product {product_id} has no items to resolve a SKU from")]
    NoItems { product_id: ProductId },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// Publish failed due to internal lock poisoning.
    #[error("channel lock poisoned")]
    Poisoned,

    /// The channel was closed (its owner unmounted).
    #[error("channel closed")]
    Closed,
}
