//! Publish/subscribe channels and analytics (pixel) events for a product page.
//!
//! Two concerns live here:
//! - **Channels**: context-style subscriptions that hand every subscriber the
//!   current value and then each new one.
//! - **Pixel events**: the `pageInfo`/`productView` payloads describing a
//!   product view, and the sink they are handed to.

pub mod builder;
pub mod bus;
pub mod envelope;
pub mod error;
pub mod event;
pub mod in_memory_bus;
pub mod sink;

pub use builder::{RenderEnvironment, build_pixel_events, js_number_text};
pub use bus::{Channel, Subscription};
pub use envelope::PixelBatch;
pub use error::{ChannelError, PixelError};
pub use event::{PageInfoEvent, PixelEvent, ProductViewEvent};
pub use in_memory_bus::InMemoryChannel;
pub use sink::{ChannelSink, PixelSink};
