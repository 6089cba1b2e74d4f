//! In-memory channel.

use std::sync::{Mutex, mpsc};

use crate::bus::{Channel, Subscription};
use crate::error::ChannelError;

#[derive(Debug)]
struct Inner<M> {
    subscribers: Vec<mpsc::Sender<M>>,
    latest: Option<M>,
    closed: bool,
}

/// In-memory pub/sub channel that remembers its latest value.
///
/// - No IO / no async
/// - Fan-out to every live subscriber
/// - Dead subscribers are dropped while publishing
#[derive(Debug)]
pub struct InMemoryChannel<M> {
    inner: Mutex<Inner<M>>,
}

impl<M> InMemoryChannel<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel whose subscribers start from `initial`.
    pub fn with_value(initial: M) -> Self {
        Self {
            inner: Mutex::new(Inner {
                subscribers: Vec::new(),
                latest: Some(initial),
                closed: false,
            }),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.subscribers.len())
            .unwrap_or(0)
    }

    /// Disconnect every subscriber. Later publishes fail with `Closed`.
    pub fn close(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.closed = true;
            inner.subscribers.clear();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().map(|inner| inner.closed).unwrap_or(true)
    }
}

impl<M> Default for InMemoryChannel<M> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                subscribers: Vec::new(),
                latest: None,
                closed: false,
            }),
        }
    }
}

impl<M> Channel<M> for InMemoryChannel<M>
where
    M: Clone + Send + 'static,
{
    type Error = ChannelError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().map_err(|_| ChannelError::Poisoned)?;
        if inner.closed {
            return Err(ChannelError::Closed);
        }

        inner.subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        inner.latest = Some(message);

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // A poisoned or closed channel still hands out a subscription; it is
        // simply disconnected from the start.
        if let Ok(mut inner) = self.inner.lock() {
            if !inner.closed {
                if let Some(current) = inner.latest.clone() {
                    let _ = tx.send(current);
                }
                inner.subscribers.push(tx);
            }
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::TryRecvError;

    #[test]
    fn new_subscriber_receives_current_value_first() {
        let channel = InMemoryChannel::with_value(1);
        channel.publish(2).unwrap();

        let sub = channel.subscribe();
        channel.publish(3).unwrap();

        assert_eq!(sub.drain(), vec![2, 3]);
    }

    #[test]
    fn empty_channel_sends_nothing_on_subscribe() {
        let channel: InMemoryChannel<u8> = InMemoryChannel::new();
        let sub = channel.subscribe();
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn every_subscriber_gets_every_message() {
        let channel: InMemoryChannel<&str> = InMemoryChannel::new();
        let a = channel.subscribe();
        let b = channel.subscribe();

        channel.publish("x").unwrap();
        channel.publish("y").unwrap();

        assert_eq!(a.drain(), vec!["x", "y"]);
        assert_eq!(b.latest(), Some("y"));
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let channel: InMemoryChannel<u32> = InMemoryChannel::new();
        let keep = channel.subscribe();
        drop(channel.subscribe());
        assert_eq!(channel.subscriber_count(), 2);

        channel.publish(7).unwrap();

        assert_eq!(channel.subscriber_count(), 1);
        assert_eq!(keep.recv().unwrap(), 7);
    }

    #[test]
    fn close_disconnects_subscribers() {
        let channel = InMemoryChannel::with_value(1);
        let sub = channel.subscribe();
        channel.close();

        assert_eq!(sub.try_recv(), Ok(1));
        assert_eq!(sub.try_recv(), Err(TryRecvError::Disconnected));
        assert_eq!(channel.publish(2), Err(ChannelError::Closed));
        assert!(channel.is_closed());
    }
}
