//! In-hand actions

use serde::{Deserialize, Serialize};

use super::{validate_amount, validate_game_number};
use crate::ffi::H2N_MAX_SEATS;
use crate::{Action, ApiError, Result};

/// One player action inside a hand announced by a [`crate::HandStartMessage`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct HandActionMessage {
    pub game_number: u64,
    pub seat_index: u32,
    pub action: Action,
    pub amount: f64,
    pub is_all_in: bool,
    /// Pot after the action
    pub pot: f64,
}

impl HandActionMessage {
    pub fn new(game_number: u64, seat_index: u32, action: Action, amount: f64) -> Self {
        Self { game_number, seat_index, action, amount, ..Self::default() }
    }

    pub fn all_in(mut self) -> Self {
        self.is_all_in = true;
        self
    }

    pub fn with_pot(mut self, pot: f64) -> Self {
        self.pot = pot;
        self
    }

    /// Check the message can be delivered.
    pub fn validate(&self) -> Result<()> {
        validate_game_number(self.game_number)?;
        if self.seat_index as usize >= H2N_MAX_SEATS {
            return Err(ApiError::invalid_field(
                "seat_index",
                format!("{} is outside 0..{H2N_MAX_SEATS}", self.seat_index),
            ));
        }
        validate_amount("amount", self.amount)?;
        validate_amount("pot", self.pot)
    }
}
