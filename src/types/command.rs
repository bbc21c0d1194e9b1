//! HUD control commands

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::ffi;

/// Out-of-band command addressed to the HUD of one table window.
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
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[repr(i32)]
pub enum Command {
    /// Shut down the HUD of a table whose window stays open after the table
    /// itself was closed (common with mobile-emulator rooms). Not needed when
    /// the window is actually destroyed.
    CloseHud = ffi::H2N_COMMAND_CLOSEHUD,
    /// Show "Please, reopen the table." in the table's HUD.
    TableNeedsReopen = ffi::H2N_COMMAND_REOPENTABLE,
    /// Show "Please, restart emulator." in the table's HUD.
    EmulatorNeedsRestart = ffi::H2N_COMMAND_RESTARTEMULATOR,
}

impl Command {
    pub const fn wire(self) -> i32 {
        self as i32
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}
