use std::sync::mpsc;

use serde_json::Value as JsonValue;

use product_context_core::DispatchId;

use crate::action::ProductAction;
use crate::error::DispatchError;

/// Write handle onto a product page's state.
///
/// Cloning is cheap and every clone compares equal: the handle a container
/// publishes never changes for the container's lifetime. Actions are queued
/// and applied in order when the container flushes.
#[derive(Debug, Clone)]
pub struct Dispatch {
    id: DispatchId,
    queue: mpsc::Sender<ProductAction>,
}

impl Dispatch {
    pub(crate) fn new() -> (Self, mpsc::Receiver<ProductAction>) {
        let (queue, actions) = mpsc::channel();
        (
            Self {
                id: DispatchId::new(),
                queue,
            },
            actions,
        )
    }

    pub fn id(&self) -> DispatchId {
        self.id
    }

    pub fn dispatch(&self, action: ProductAction) -> Result<(), DispatchError> {
        tracing::trace!(dispatch = %self.id, action = action.action_type(), "queueing product action");
        self.queue.send(action).map_err(|_| DispatchError::Unmounted)
    }

    /// Queue an action given in its `{type, args}` JSON form.
    pub fn dispatch_json(&self, action: JsonValue) -> Result<(), DispatchError> {
        self.dispatch(ProductAction::from_json(action))
    }
}

impl PartialEq for Dispatch {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Dispatch {}
