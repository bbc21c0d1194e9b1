//! Table currencies

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::ffi;

/// Currency of the stakes in a hand start.
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
pub enum Currency {
    Undefined = ffi::H2N_CURRENCY_UNDEFINED,
    #[default]
    Dollar = ffi::H2N_CURRENCY_DOLLAR,
    Euro = ffi::H2N_CURRENCY_EURO,
    Pound = ffi::H2N_CURRENCY_POUND,
    PlayMoney = ffi::H2N_CURRENCY_PLAYMONEY,
    Points = ffi::H2N_CURRENCY_POINTS,
    Chips = ffi::H2N_CURRENCY_CHIPS,
    Yuan = ffi::H2N_CURRENCY_YUAN,
    IndianRupee = ffi::H2N_CURRENCY_INDIANRUPEE,
    Hryvnia = ffi::H2N_CURRENCY_HRYVNIA,
    Rouble = ffi::H2N_CURRENCY_ROUBLE,
    GeorgianLari = ffi::H2N_CURRENCY_GEORGIANLARI,
}

impl Currency {
    /// Wire value passed to `h2napi`.
    pub const fn wire(self) -> i32 {
        self as i32
    }

    /// Look up a currency by its wire value.
    pub fn from_wire(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Whether amounts in this currency are real money.
    pub fn is_real_money(self) -> bool {
        !matches!(self, Self::Undefined | Self::PlayMoney | Self::Points | Self::Chips)
    }
}
