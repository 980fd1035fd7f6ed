// Scandecode Decoder
// Turns one batch of raw scan code events into one canonical key event

pub mod tables;

use crate::error::{DecodeError, MalformedReason};
use crate::event::{CanonicalKeyEvent, EventBatch};
use crate::input::RawEvent;
use crate::key::{KeyId, MAX_SCAN_CODE};

/// Decode a batch of raw events.
///
/// A batch holds the events the capture layer grouped for one physical key
/// transition. One event resolves through the direct table or the extended
/// flag; two events must form a known combination (fake shift around a
/// navigation key, or the E1 Pause sequence). The press state always comes
/// from the flags' up/down sense.
///
/// # Errors
/// * [`DecodeError::MalformedBatch`] for an empty batch, more than two
///   events, a code above [`MAX_SCAN_CODE`], or two events that disagree on
///   press/release
/// * [`DecodeError::UnrecognizedCombination`] for two events forming no
///   known pattern
///
/// # Examples
/// ```
/// use scandecode_core::{decode, EventBatch, KeyId, RawFlag};
///
/// let batch = EventBatch::pair((42, RawFlag::ExtendedDown), (71, RawFlag::ExtendedDown));
/// let event = decode(&batch).unwrap();
/// assert_eq!(event.key, KeyId(327)); // Home
/// assert!(event.pressed);
/// ```
pub fn decode(batch: &EventBatch) -> Result<CanonicalKeyEvent, DecodeError> {
    decode_events(batch.as_slice())
}

/// Decode a slice of raw events. See [`decode`].
pub fn decode_events(events: &[RawEvent]) -> Result<CanonicalKeyEvent, DecodeError> {
    if let Some(event) = events.iter().find(|ev| ev.code > MAX_SCAN_CODE) {
        return Err(DecodeError::malformed(
            MalformedReason::CodeOutOfRange(event.code),
            events,
        ));
    }

    let decoded = match events {
        [] => return Err(DecodeError::malformed(MalformedReason::Empty, events)),
        [event] => decode_single(*event),
        [first, second] => decode_pair(*first, *second)?,
        _ => {
            return Err(DecodeError::malformed(
                MalformedReason::TooManyEvents(events.len()),
                events,
            ))
        }
    };

    log::trace!(
        "decoded {:?} -> {} ({}) {}",
        events,
        decoded.key.code(),
        decoded.key,
        if decoded.pressed { "down" } else { "up" }
    );
    Ok(decoded)
}

fn decode_single(event: RawEvent) -> CanonicalKeyEvent {
    let key = match tables::direct(event.code) {
        Some(key) => key,
        None if event.flag.is_extended() => KeyId::extended(event.code),
        None => KeyId::plain(event.code),
    };

    CanonicalKeyEvent::new(key, event.is_pressed())
}

fn decode_pair(first: RawEvent, second: RawEvent) -> Result<CanonicalKeyEvent, DecodeError> {
    if first.is_pressed() != second.is_pressed() {
        return Err(DecodeError::malformed(
            MalformedReason::InconsistentSense,
            &[first, second],
        ));
    }

    let key = tables::combination(first, second)
        .ok_or(DecodeError::UnrecognizedCombination { first, second })?;

    Ok(CanonicalKeyEvent::new(key, first.is_pressed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawFlag;
    use strum::IntoEnumIterator;

    fn single(code: u16, flag: RawFlag) -> Result<CanonicalKeyEvent, DecodeError> {
        decode(&EventBatch::single(code, flag))
    }

    #[test]
    fn test_plain_code_passes_through() {
        assert_eq!(
            single(28, RawFlag::Down),
            Ok(CanonicalKeyEvent::new(KeyId(28), true))
        );
        assert_eq!(
            single(30, RawFlag::Up),
            Ok(CanonicalKeyEvent::new(KeyId(30), false))
        );
    }

    #[test]
    fn test_extended_flag_shifts_code() {
        assert_eq!(
            single(28, RawFlag::ExtendedDown),
            Ok(CanonicalKeyEvent::new(KeyId(284), true))
        );
        assert_eq!(
            single(29, RawFlag::ExtendedUp),
            Ok(CanonicalKeyEvent::new(KeyId(285), false))
        );
    }

    #[test]
    fn test_single_e1_is_not_extended() {
        assert_eq!(
            single(29, RawFlag::E1Down),
            Ok(CanonicalKeyEvent::new(KeyId(29), true))
        );
    }

    #[test]
    fn test_direct_table_ignores_flag() {
        for (code, key) in tables::direct_entries() {
            for flag in RawFlag::iter() {
                assert_eq!(
                    single(code, flag),
                    Ok(CanonicalKeyEvent::new(key, flag.is_pressed())),
                    "code {} flag {}",
                    code,
                    flag
                );
            }
        }
    }

    #[test]
    fn test_pause_differs_from_numlock() {
        let pause = decode(&EventBatch::pair((29, RawFlag::E1Down), (69, RawFlag::Down))).unwrap();
        let numlock = single(69, RawFlag::Down).unwrap();
        assert_eq!(pause.key, KeyId::PAUSE);
        assert_eq!(numlock.key, KeyId::NUM_LOCK);
        assert_ne!(pause.key, numlock.key);
    }

    #[test]
    fn test_inconsistent_sense_is_malformed() {
        let err = decode(&EventBatch::pair(
            (42, RawFlag::ExtendedDown),
            (71, RawFlag::ExtendedUp),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedBatch {
                reason: MalformedReason::InconsistentSense,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_pair_is_rejected() {
        let err = decode(&EventBatch::pair((30, RawFlag::Down), (31, RawFlag::Down))).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnrecognizedCombination {
                first: RawEvent::new(30, RawFlag::Down),
                second: RawEvent::new(31, RawFlag::Down),
            }
        );
    }

    #[test]
    fn test_empty_batch() {
        let err = decode(&EventBatch::new()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedBatch {
                reason: MalformedReason::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_too_many_events() {
        let batch: EventBatch = [42, 71, 42]
            .into_iter()
            .map(|code| RawEvent::new(code, RawFlag::ExtendedDown))
            .collect();
        let err = decode(&batch).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedBatch {
                reason: MalformedReason::TooManyEvents(3),
                ..
            }
        ));
    }

    #[test]
    fn test_code_out_of_range() {
        let err = single(MAX_SCAN_CODE + 1, RawFlag::Down).unwrap_err();
        assert!(err.is_malformed());
        assert!(single(MAX_SCAN_CODE, RawFlag::ExtendedDown).is_ok());
    }
}
