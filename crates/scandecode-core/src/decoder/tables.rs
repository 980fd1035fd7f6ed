// Scandecode Lookup Tables
// Direct code overrides and two-event combination patterns

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::input::{FlagPrefix, RawEvent};
use crate::key::KeyId;

/// Left Shift, also emitted as the "fake shift" around navigation keys.
pub const FAKE_SHIFT: u16 = 42;
/// Control, sent with the `E1` prefix as the first half of Pause.
pub const CONTROL: u16 = 29;
/// NumLock, the second half of Pause.
pub const NUM_LOCK: u16 = 69;
/// Print Screen, which also comes wrapped in a fake shift.
pub const PRINT_SCREEN: u16 = 55;
/// Right Shift.
pub const RIGHT_SHIFT: u16 = 54;

/// Navigation cluster codes that may arrive with a fake shift.
pub const NAVIGATION_CODES: [u16; 10] = [
    71, // Home
    72, // Up
    73, // PgUp
    75, // Left
    77, // Right
    79, // End
    80, // Down
    81, // PgDn
    82, // Insert
    83, // Delete
];

/// Codes whose id never depends on the flag.
static DIRECT_TABLE: LazyLock<HashMap<u16, KeyId>> = LazyLock::new(|| {
    HashMap::from([
        // Right Shift has no E0 prefix on most boards
        (RIGHT_SHIFT, KeyId::RIGHT_SHIFT),
        // Plain NumLock, kept apart from the Pause id
        (NUM_LOCK, KeyId::NUM_LOCK),
    ])
});

/// A recognized two-event pattern.
///
/// Keyed by the code pair sorted ascending; `low` and `high` give the prefix
/// required on the event carrying the smaller and larger code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    pub low: FlagPrefix,
    pub high: FlagPrefix,
    pub key: KeyId,
}

static COMBINATION_TABLE: LazyLock<HashMap<(u16, u16), Combination>> = LazyLock::new(|| {
    let mut table = HashMap::new();

    for code in NAVIGATION_CODES.into_iter().chain([PRINT_SCREEN]) {
        table.insert(
            ordered(FAKE_SHIFT, code),
            Combination {
                low: FlagPrefix::Extended,
                high: FlagPrefix::Extended,
                key: KeyId::extended(code),
            },
        );
    }

    // E1 1D 45: Control carries the E1 prefix, NumLock none
    table.insert(
        ordered(CONTROL, NUM_LOCK),
        Combination {
            low: FlagPrefix::E1,
            high: FlagPrefix::Plain,
            key: KeyId::PAUSE,
        },
    );

    log::debug!("built combination table with {} patterns", table.len());
    table
});

fn ordered(a: u16, b: u16) -> (u16, u16) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Look up a code in the direct table
pub fn direct(code: u16) -> Option<KeyId> {
    DIRECT_TABLE.get(&code).copied()
}

/// All direct table entries
pub fn direct_entries() -> impl Iterator<Item = (u16, KeyId)> {
    DIRECT_TABLE.iter().map(|(&code, &key)| (code, key))
}

/// Resolve two events against the combination table, in either order.
///
/// Returns `None` when the codes form no known pattern or when the flags do
/// not carry the prefixes the pattern requires.
pub fn combination(a: RawEvent, b: RawEvent) -> Option<KeyId> {
    let (low, high) = if a.code <= b.code { (a, b) } else { (b, a) };
    let entry = COMBINATION_TABLE.get(&(low.code, high.code))?;

    (low.flag.prefix() == entry.low && high.flag.prefix() == entry.high).then_some(entry.key)
}

/// All combination table entries, keyed by sorted code pair
pub fn combination_entries() -> impl Iterator<Item = ((u16, u16), Combination)> {
    COMBINATION_TABLE.iter().map(|(&codes, &entry)| (codes, entry))
}
