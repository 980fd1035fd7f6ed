// Scandecode Core Library
// Decodes raw PC scan code events into canonical key events

pub mod decoder;
pub mod error;
pub mod event;
pub mod input;
pub mod key;
pub mod trace;

#[cfg(feature = "settings")]
pub mod settings;

pub use decoder::{decode, decode_events};
pub use error::{DecodeError, MalformedReason};
pub use event::{CanonicalKeyEvent, EventBatch};
pub use input::{FlagPrefix, InvalidState, RawEvent, RawFlag};
pub use key::{key_from_name, key_name, KeyId, EXTENDED_OFFSET, MAX_SCAN_CODE};
pub use trace::{parse_line, parse_trace, TraceError};

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError, UnrecognizedPolicy};
