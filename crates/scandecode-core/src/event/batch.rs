// Scandecode Event Batches
// Raw events belonging to one physical key transition

use smallvec::SmallVec;

use crate::input::{RawEvent, RawFlag};

/// Number of events a batch stores inline before spilling to the heap.
pub const INLINE_EVENTS: usize = 2;

/// Batch of raw events reported for a single physical key transition
///
/// Most keys produce one event; a few hardware artifacts (the fake shift
/// around navigation keys, the E1 Pause sequence) produce two. The batch
/// itself accepts any number of events so that the decoder can reject
/// malformed input instead of the caller silently truncating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBatch {
    events: SmallVec<[RawEvent; INLINE_EVENTS]>,
}

impl EventBatch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self {
            events: SmallVec::new(),
        }
    }

    /// Batch holding a single event
    pub fn single(code: u16, flag: RawFlag) -> Self {
        RawEvent::new(code, flag).into()
    }

    /// Batch holding two events, in arrival order
    pub fn pair(first: (u16, RawFlag), second: (u16, RawFlag)) -> Self {
        [
            RawEvent::new(first.0, first.1),
            RawEvent::new(second.0, second.1),
        ]
        .into_iter()
        .collect()
    }

    /// Add an event to the batch
    pub fn push(&mut self, event: RawEvent) {
        self.events.push(event);
    }

    /// Extend the batch with multiple events
    pub fn extend(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        self.events.extend(events);
    }

    /// Get the number of events in the batch
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear the batch
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterate over the events
    pub fn iter(&self) -> impl Iterator<Item = &RawEvent> {
        self.events.iter()
    }

    /// Get a reference to the underlying events
    pub fn as_slice(&self) -> &[RawEvent] {
        &self.events
    }
}

impl From<RawEvent> for EventBatch {
    fn from(event: RawEvent) -> Self {
        let mut batch = Self::new();
        batch.push(event);
        batch
    }
}

impl FromIterator<RawEvent> for EventBatch {
    fn from_iter<I: IntoIterator<Item = RawEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[RawEvent]> for EventBatch {
    fn as_ref(&self) -> &[RawEvent] {
        &self.events
    }
}
