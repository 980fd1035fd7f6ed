// Scandecode Input Layer - Raw Events
// Scan code + flag pairs as delivered by the interception driver

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Prefix byte class of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagPrefix {
    /// No prefix byte
    Plain,
    /// `E0` prefix
    Extended,
    /// `E1` prefix (only used by Pause)
    E1,
}

/// Flag attached to a raw scan code.
///
/// Combines the up/down sense with the prefix class. The numeric values used
/// by the interception driver are available through [`RawFlag::state`] and
/// `TryFrom<u16>`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum RawFlag {
    Down,
    Up,
    ExtendedDown,
    ExtendedUp,
    E1Down,
    E1Up,
}

/// Numeric key state outside the driver's `0..=5` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid key state: {0}")]
pub struct InvalidState(pub u16);

impl RawFlag {
    /// Whether the flag reports a key press
    pub fn is_pressed(self) -> bool {
        match self {
            RawFlag::Down | RawFlag::ExtendedDown | RawFlag::E1Down => true,
            RawFlag::Up | RawFlag::ExtendedUp | RawFlag::E1Up => false,
        }
    }

    /// Prefix class of the flag
    pub fn prefix(self) -> FlagPrefix {
        match self {
            RawFlag::Down | RawFlag::Up => FlagPrefix::Plain,
            RawFlag::ExtendedDown | RawFlag::ExtendedUp => FlagPrefix::Extended,
            RawFlag::E1Down | RawFlag::E1Up => FlagPrefix::E1,
        }
    }

    /// Whether the flag carries the `E0` prefix
    pub fn is_extended(self) -> bool {
        self.prefix() == FlagPrefix::Extended
    }

    /// Whether the flag carries the `E1` prefix
    pub fn is_e1(self) -> bool {
        self.prefix() == FlagPrefix::E1
    }

    /// Interception driver key state for this flag
    pub fn state(self) -> u16 {
        match self {
            RawFlag::Down => 0,
            RawFlag::Up => 1,
            RawFlag::ExtendedDown => 2,
            RawFlag::ExtendedUp => 3,
            RawFlag::E1Down => 4,
            RawFlag::E1Up => 5,
        }
    }
}

impl TryFrom<u16> for RawFlag {
    type Error = InvalidState;

    fn try_from(state: u16) -> Result<Self, Self::Error> {
        match state {
            0 => Ok(RawFlag::Down),
            1 => Ok(RawFlag::Up),
            2 => Ok(RawFlag::ExtendedDown),
            3 => Ok(RawFlag::ExtendedUp),
            4 => Ok(RawFlag::E1Down),
            5 => Ok(RawFlag::E1Up),
            n => Err(InvalidState(n)),
        }
    }
}

/// A single raw scan code event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEvent {
    pub code: u16,
    pub flag: RawFlag,
}

impl RawEvent {
    pub fn new(code: u16, flag: RawFlag) -> Self {
        Self { code, flag }
    }

    /// Build an event from a driver (code, state) pair
    pub fn from_state(code: u16, state: u16) -> Result<Self, InvalidState> {
        Ok(Self::new(code, RawFlag::try_from(state)?))
    }

    pub fn is_pressed(&self) -> bool {
        self.flag.is_pressed()
    }
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.flag)
    }
}
