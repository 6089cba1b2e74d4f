use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::PixelEvent;

/// Envelope for one emission of pixel events.
///
/// This is the unit handed to a [`PixelSink`](crate::PixelSink).
///
/// Notes:
/// - `events` keeps the builder's order (`pageInfo` before `productView`).
/// - `loading` mirrors the product fetch; sinks hold off while it is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelBatch {
    batch_id: Uuid,
    created_at: DateTime<Utc>,
    loading: bool,
    events: Vec<PixelEvent>,
}

impl PixelBatch {
    pub fn new(events: Vec<PixelEvent>, loading: bool) -> Self {
        Self::with_metadata(Uuid::now_v7(), Utc::now(), events, loading)
    }

    pub fn with_metadata(
        batch_id: Uuid,
        created_at: DateTime<Utc>,
        events: Vec<PixelEvent>,
        loading: bool,
    ) -> Self {
        Self {
            batch_id,
            created_at,
            loading,
            events,
        }
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn events(&self) -> &[PixelEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
