//! Betting rounds

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::ffi;

/// Betting round. The wire value is the number of visible board cards, so
/// the sequence is 0, 3, 4, 5 rather than 0, 1, 2, 3.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[repr(i32)]
pub enum Street {
    Preflop = ffi::H2N_STREET_PREFLOP,
    #[default]
    Flop = ffi::H2N_STREET_FLOP,
    Turn = ffi::H2N_STREET_TURN,
    River = ffi::H2N_STREET_RIVER,
}

impl Street {
    pub const fn wire(self) -> i32 {
        self as i32
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Number of community cards visible on this street.
    pub const fn board_cards(self) -> usize {
        self as usize
    }

    /// Street that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }
}
