// Scandecode Decode Errors

use thiserror::Error;

use crate::event::EventBatch;
use crate::input::RawEvent;

/// Why a batch was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("batch is empty")]
    Empty,
    #[error("batch holds {0} events, at most 2 allowed")]
    TooManyEvents(usize),
    #[error("events disagree on press/release")]
    InconsistentSense,
    #[error("scan code {0} is outside the legacy range")]
    CodeOutOfRange(u16),
}

/// Errors returned by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Structural precondition violated by the caller
    #[error("malformed batch: {reason} ({events:?})")]
    MalformedBatch {
        reason: MalformedReason,
        events: EventBatch,
    },

    /// Two events that form no known pattern
    #[error("unrecognized combination: {first} + {second}")]
    UnrecognizedCombination { first: RawEvent, second: RawEvent },
}

impl DecodeError {
    pub(crate) fn malformed(reason: MalformedReason, events: &[RawEvent]) -> Self {
        DecodeError::MalformedBatch {
            reason,
            events: events.iter().copied().collect(),
        }
    }

    /// Whether the error is a caller bug rather than unknown input
    pub fn is_malformed(&self) -> bool {
        matches!(self, DecodeError::MalformedBatch { .. })
    }
}
