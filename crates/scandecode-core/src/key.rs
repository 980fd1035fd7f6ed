// Scandecode Key Identifiers
// Canonical key ids in the plain/extended numbering space

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Offset added to a raw scan code to move it into the extended key space.
pub const EXTENDED_OFFSET: u16 = 256;

/// Largest raw scan code the decoder accepts.
///
/// Codes must stay below [`EXTENDED_OFFSET`] so that plain and extended
/// ids never overlap.
pub const MAX_SCAN_CODE: u16 = EXTENDED_OFFSET - 1;

/// Represents a canonical key identifier.
///
/// Plain keys use their raw scan code as id. Extended keys (right-hand
/// modifiers, the navigation cluster, numpad duplicates, system keys) live at
/// `code + EXTENDED_OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KeyId(pub u16);

impl KeyId {
    /// The Pause key. Reuses the NumLock raw value, which a plain NumLock
    /// press never produces because NumLock decodes to [`KeyId::NUM_LOCK`].
    pub const PAUSE: KeyId = KeyId(69);
    /// NumLock as produced by a standalone NumLock event.
    pub const NUM_LOCK: KeyId = KeyId(69 + EXTENDED_OFFSET);
    /// Right Shift. Reported without the extended flag by most keyboards.
    pub const RIGHT_SHIFT: KeyId = KeyId(54 + EXTENDED_OFFSET);

    /// Id of a plain (non-extended) key.
    pub const fn plain(code: u16) -> Self {
        KeyId(code)
    }

    /// Id of an extended key.
    pub const fn extended(code: u16) -> Self {
        KeyId(code + EXTENDED_OFFSET)
    }

    /// Get the raw numeric id
    pub fn code(self) -> u16 {
        self.0
    }

    /// Whether this id lies in the extended range
    pub fn is_extended(self) -> bool {
        self.0 >= EXTENDED_OFFSET
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        key_name(self)
    }
}

impl From<u16> for KeyId {
    fn from(code: u16) -> Self {
        KeyId(code)
    }
}

impl From<KeyId> for u16 {
    fn from(key: KeyId) -> Self {
        key.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

/// Named ids for a standard 101/102-key board.
static KEY_NAMES: &[(u16, &str)] = &[
    (1, "Esc"),
    (2, "1"),
    (3, "2"),
    (4, "3"),
    (5, "4"),
    (6, "5"),
    (7, "6"),
    (8, "7"),
    (9, "8"),
    (10, "9"),
    (11, "0"),
    (12, "Minus"),
    (13, "Equals"),
    (14, "Backspace"),
    (15, "Tab"),
    (16, "Q"),
    (17, "W"),
    (18, "E"),
    (19, "R"),
    (20, "T"),
    (21, "Y"),
    (22, "U"),
    (23, "I"),
    (24, "O"),
    (25, "P"),
    (26, "LBracket"),
    (27, "RBracket"),
    (28, "Enter"),
    (29, "LCtrl"),
    (30, "A"),
    (31, "S"),
    (32, "D"),
    (33, "F"),
    (34, "G"),
    (35, "H"),
    (36, "J"),
    (37, "K"),
    (38, "L"),
    (39, "Semicolon"),
    (40, "Quote"),
    (41, "Backtick"),
    (42, "LShift"),
    (43, "Backslash"),
    (44, "Z"),
    (45, "X"),
    (46, "C"),
    (47, "V"),
    (48, "B"),
    (49, "N"),
    (50, "M"),
    (51, "Comma"),
    (52, "Period"),
    (53, "Slash"),
    (55, "NumpadMult"),
    (56, "LAlt"),
    (57, "Space"),
    (58, "CapsLock"),
    (59, "F1"),
    (60, "F2"),
    (61, "F3"),
    (62, "F4"),
    (63, "F5"),
    (64, "F6"),
    (65, "F7"),
    (66, "F8"),
    (67, "F9"),
    (68, "F10"),
    (69, "Pause"),
    (70, "ScrollLock"),
    (71, "Numpad7"),
    (72, "Numpad8"),
    (73, "Numpad9"),
    (74, "NumpadSub"),
    (75, "Numpad4"),
    (76, "Numpad5"),
    (77, "Numpad6"),
    (78, "NumpadAdd"),
    (79, "Numpad1"),
    (80, "Numpad2"),
    (81, "Numpad3"),
    (82, "Numpad0"),
    (83, "NumpadDot"),
    (86, "Oem102"),
    (87, "F11"),
    (88, "F12"),
    // Extended space
    (0x10 + EXTENDED_OFFSET, "MediaPrev"),
    (0x19 + EXTENDED_OFFSET, "MediaNext"),
    (28 + EXTENDED_OFFSET, "NumpadEnter"),
    (29 + EXTENDED_OFFSET, "RCtrl"),
    (0x20 + EXTENDED_OFFSET, "VolumeMute"),
    (0x22 + EXTENDED_OFFSET, "MediaPlayPause"),
    (0x24 + EXTENDED_OFFSET, "MediaStop"),
    (0x2E + EXTENDED_OFFSET, "VolumeDown"),
    (0x30 + EXTENDED_OFFSET, "VolumeUp"),
    (0x32 + EXTENDED_OFFSET, "BrowserHome"),
    (53 + EXTENDED_OFFSET, "NumpadDiv"),
    (54 + EXTENDED_OFFSET, "RShift"),
    (55 + EXTENDED_OFFSET, "PrintScreen"),
    (56 + EXTENDED_OFFSET, "RAlt"),
    (69 + EXTENDED_OFFSET, "NumLock"),
    (71 + EXTENDED_OFFSET, "Home"),
    (72 + EXTENDED_OFFSET, "Up"),
    (73 + EXTENDED_OFFSET, "PgUp"),
    (75 + EXTENDED_OFFSET, "Left"),
    (77 + EXTENDED_OFFSET, "Right"),
    (79 + EXTENDED_OFFSET, "End"),
    (80 + EXTENDED_OFFSET, "Down"),
    (81 + EXTENDED_OFFSET, "PgDn"),
    (82 + EXTENDED_OFFSET, "Insert"),
    (83 + EXTENDED_OFFSET, "Delete"),
    (91 + EXTENDED_OFFSET, "LWin"),
    (92 + EXTENDED_OFFSET, "RWin"),
    (93 + EXTENDED_OFFSET, "AppsKey"),
    (0x5F + EXTENDED_OFFSET, "Sleep"),
];

/// Display name for a key id
pub fn key_name(key: KeyId) -> &'static str {
    static NAMES_BY_ID: OnceLock<Vec<&'static str>> = OnceLock::new();
    NAMES_BY_ID
        .get_or_init(|| {
            let mut names = vec!["Unknown"; 2 * EXTENDED_OFFSET as usize];
            for &(code, name) in KEY_NAMES {
                names[code as usize] = name;
            }
            names
        })
        .get(key.0 as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Try to parse a key name to a key id (case-insensitive)
pub fn key_from_name(name: &str) -> Option<KeyId> {
    KEY_NAMES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|&(code, _)| KeyId(code))
}
