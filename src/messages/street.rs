//! Street changes

use serde::{Deserialize, Serialize};

use super::{validate_amount, validate_game_number};
use crate::{Result, Street};

/// A new street was dealt. `board` holds every visible community card,
/// e.g. `5h8s7sTs` on the turn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct StreetMessage {
    pub game_number: u64,
    pub street: Street,
    pub board: String,
    /// Pot at the start of the street
    pub pot: f64,
}

impl StreetMessage {
    pub fn new(game_number: u64, street: Street, board: impl Into<String>, pot: f64) -> Self {
        Self { game_number, street, board: board.into(), pot }
    }

    /// Check the message can be delivered.
    pub fn validate(&self) -> Result<()> {
        validate_game_number(self.game_number)?;
        validate_amount("pot", self.pot)
    }
}
