//! Player action kinds

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::ffi;

/// Kind of a single in-hand action.
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
pub enum Action {
    #[default]
    Fold = ffi::H2N_ACTION_FOLD,
    Call = ffi::H2N_ACTION_CALL,
    Raise = ffi::H2N_ACTION_RAISE,
    Check = ffi::H2N_ACTION_CHECK,
    Bet = ffi::H2N_ACTION_BET,
}

impl Action {
    pub const fn wire(self) -> i32 {
        self as i32
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Whether the action puts chips into the pot.
    pub fn is_aggressive(self) -> bool {
        matches!(self, Self::Raise | Self::Bet)
    }
}
