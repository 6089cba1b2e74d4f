//! Context-style publish/subscribe abstraction (mechanics only).
//!
//! A product page publishes two independent values to its descendants: the
//! current state and the handle used to change it. Each gets its own channel
//! so that consumers of one are never woken by the other.
//!
//! ## Semantics
//!
//! - **Current value first**: a new subscriber immediately receives the value
//!   most recently published (if any), then every later one.
//! - **Broadcast**: each subscriber receives its own copy of every message.
//! - **Ordered**: messages arrive in the order they were published.
//! - **No persistence**: only the latest value is retained.
//!
//! Closing a channel disconnects every subscriber; `recv` then returns an
//! error and `try_recv` reports `Disconnected` once the backlog is drained.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, TryRecvError};

/// A subscription to a channel.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = channel.subscribe();
///
/// // Render with the current value, then react to changes.
/// while let Some(state) = subscription.latest() {
///     render(&state);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything pending and keep only the newest message.
    ///
    /// Consumers that only care about the current value (a re-render) use this
    /// to coalesce a burst of updates.
    pub fn latest(&self) -> Option<M> {
        self.receiver.try_iter().last()
    }

    /// Drain everything pending, oldest first.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Publish/subscribe channel for a single kind of value.
///
/// The trait requires `Send + Sync` so handles can be shared freely, even
/// though a product page drives its channels from a single thread.
pub trait Channel<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, C> Channel<M> for Arc<C>
where
    C: Channel<M> + ?Sized,
{
    type Error = C::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
