//! Hand history text formats

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::ffi;

/// Text format of a completed hand history.
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
pub enum HandHistoryFormat {
    /// The room's own format (e.g. XML for Connective rooms)
    #[default]
    Original = ffi::H2N_HHFMT_ORIGINAL,
    Stars = ffi::H2N_HHFMT_STARS,
    Pacific = ffi::H2N_HHFMT_PACIFIC,
    Wpn = ffi::H2N_HHFMT_WPN,
}

impl HandHistoryFormat {
    pub const fn wire(self) -> i32 {
        self as i32
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}
