//! Domain events emitted by DropVault operations.
//!
//! Every workspace mutation records an event; the presentation layer and
//! the CLI consume them, and tests assert on them.

pub mod file;
pub mod notification;
pub mod upload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::SimInstant;

pub use file::FileEvent;
pub use notification::{Notification, NotificationLevel};
pub use upload::UploadEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// Wall-clock time the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Simulated session time the event was recorded.
    pub at: SimInstant,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A file-related event.
    File(FileEvent),
    /// An upload-related event.
    Upload(UploadEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(at: SimInstant, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            at,
            payload,
        }
    }
}

impl From<FileEvent> for EventPayload {
    fn from(event: FileEvent) -> Self {
        Self::File(event)
    }
}

impl From<UploadEvent> for EventPayload {
    fn from(event: UploadEvent) -> Self {
        Self::Upload(event)
    }
}
