// Scandecode Input Layer
// Raw events as handed over by the capture layer

mod event;

pub use event::{FlagPrefix, InvalidState, RawEvent, RawFlag};
