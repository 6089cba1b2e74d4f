//! View-state container for a product detail page.
//!
//! The container derives the initially selected SKU from the page's query,
//! owns the reducer over [`ProductState`], keeps the selection in step with a
//! changing `skuId`, and hands analytics events to a [`PixelSink`] once per
//! product view.
//!
//! [`PixelSink`]: product_context_events::PixelSink

pub mod action;
pub mod container;
pub mod dispatch;
pub mod error;
pub mod head;
pub mod memo;
pub mod runtime;
pub mod state;
pub mod sync;

pub use action::ProductAction;
pub use container::{ChildProps, ProductContainer};
pub use dispatch::Dispatch;
pub use error::{ConfigError, DispatchError};
pub use head::{HeadMetadata, MetaTag, PageHead, RecordingHead};
pub use memo::PixelMemo;
pub use runtime::RuntimeContext;
pub use state::{ProductState, SkuSelector};
pub use sync::{SelectedItemSync, sync_action};
