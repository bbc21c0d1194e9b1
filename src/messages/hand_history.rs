//! Completed hand history

use serde::{Deserialize, Serialize};

use super::validate_game_number;
use crate::{ApiError, HandHistoryFormat, Result, Room};

/// A completed hand, sent once the hand is over.
///
/// The table name inside `hand_history` must already be in the room-defining
/// form produced by [`crate::Hand2Note::make_table_name`]; Hand2Note reads the
/// room back from that prefix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct HandHistoryMessage {
    pub room: Room,
    /// Game/hand number, used by Hand2Note to reject duplicates without parsing
    pub game_number: u64,
    /// Zoom, fast-fold or boost pool
    pub is_zoom: bool,
    pub format: HandHistoryFormat,
    /// Hand history text in `format`, UTF-8
    pub hand_history: String,
    /// Hand history in the room's internal format (e.g. XML), may be empty
    pub original_hand_history: String,
}

impl HandHistoryMessage {
    pub fn new(
        room: Room,
        game_number: u64,
        format: HandHistoryFormat,
        hand_history: impl Into<String>,
    ) -> Self {
        Self { room, game_number, format, hand_history: hand_history.into(), ..Self::default() }
    }

    /// Check the message can be delivered.
    pub fn validate(&self) -> Result<()> {
        if self.hand_history.is_empty() {
            return Err(ApiError::missing_field("HandHistoryMessage", "hand_history"));
        }
        validate_game_number(self.game_number)
    }
}
