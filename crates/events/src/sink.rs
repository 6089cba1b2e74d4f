use std::sync::Arc;

use crate::bus::Channel;
use crate::envelope::PixelBatch;
use crate::in_memory_bus::InMemoryChannel;

/// Receives pixel batches from a product page (analytics transport boundary).
///
/// A page hands over a batch whenever its memoized events or its `loading`
/// flag change. What happens next (queueing, a `dataLayer` push, an HTTP
/// beacon) is up to the implementation.
pub trait PixelSink {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn push(&mut self, batch: &PixelBatch) -> Result<(), Self::Error>;
}

/// Forwards settled batches onto a channel.
///
/// Batches that arrive while the product is still loading, or that carry no
/// events (server render, no product), are dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    channel: Arc<InMemoryChannel<PixelBatch>>,
}

impl ChannelSink {
    pub fn new(channel: Arc<InMemoryChannel<PixelBatch>>) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &Arc<InMemoryChannel<PixelBatch>> {
        &self.channel
    }
}

impl PixelSink for ChannelSink {
    type Error = crate::error::ChannelError;

    fn push(&mut self, batch: &PixelBatch) -> Result<(), Self::Error> {
        if batch.loading() || batch.is_empty() {
            tracing::debug!(
                loading = batch.loading(),
                events = batch.events().len(),
                "holding back pixel batch"
            );
            return Ok(());
        }
        self.channel.publish(batch.clone())
    }
}

impl<S> PixelSink for &mut S
where
    S: PixelSink + ?Sized,
{
    type Error = S::Error;

    fn push(&mut self, batch: &PixelBatch) -> Result<(), Self::Error> {
        (**self).push(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PixelEvent, ProductViewEvent};
    use product_context_catalog::Product;

    fn one_event() -> Vec<PixelEvent> {
        vec![PixelEvent::ProductView(ProductViewEvent {
            product: Product::new("1"),
        })]
    }

    #[test]
    fn settled_batches_are_published() {
        let channel: Arc<InMemoryChannel<PixelBatch>> = Arc::new(InMemoryChannel::new());
        let sub = channel.subscribe();
        let mut sink = ChannelSink::new(channel);

        sink.push(&PixelBatch::new(one_event(), false)).unwrap();

        let published = sub.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].events(), one_event().as_slice());
    }

    #[test]
    fn loading_and_empty_batches_are_held_back() {
        let channel: Arc<InMemoryChannel<PixelBatch>> = Arc::new(InMemoryChannel::new());
        let sub = channel.subscribe();
        let mut sink = ChannelSink::new(channel);

        sink.push(&PixelBatch::new(one_event(), true)).unwrap();
        sink.push(&PixelBatch::new(Vec::new(), false)).unwrap();

        assert!(sub.drain().is_empty());
    }
}
