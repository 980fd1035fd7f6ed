// Scandecode Event Handling
// Batching of raw events and canonical output events

pub mod batch;

use serde::{Deserialize, Serialize};

use crate::key::KeyId;

pub use batch::EventBatch;

/// Decoded, application-facing key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalKeyEvent {
    pub key: KeyId,
    pub pressed: bool,
}

impl CanonicalKeyEvent {
    pub fn new(key: KeyId, pressed: bool) -> Self {
        Self { key, pressed }
    }
}
