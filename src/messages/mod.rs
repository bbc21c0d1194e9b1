//! Message value objects delivered to Hand2Note.
//!
//! Messages are plain data: build one, fill in its public fields, and pass it
//! to the matching `send_*` method on [`crate::Hand2Note`]. Each message can
//! check itself with `validate()`; the client always does so before touching
//! the native library, so a malformed message never reaches the tracker.
//!
//! | Message | Native call |
//! |---|---|
//! | [`HandHistoryMessage`] | `h2n_send_handhistory` |
//! | [`HandStartMessage`] | `h2n_send_hand_start` |
//! | [`HandActionMessage`] | `h2n_send_action` |
//! | [`StreetMessage`] | `h2n_send_street` |

mod action;
mod hand_history;
mod hand_start;
mod seat;
mod street;

pub use action::HandActionMessage;
pub use hand_history::HandHistoryMessage;
pub use hand_start::HandStartMessage;
pub use seat::SeatInfo;
pub use street::StreetMessage;

use crate::{ApiError, Result};

/// Largest game number the wire can carry without loss.
///
/// Game numbers travel as IEEE doubles, which represent every integer up to
/// 2^53 exactly.
pub const MAX_GAME_NUMBER: u64 = 1 << 53;

pub(crate) fn validate_game_number(game_number: u64) -> Result<()> {
    if game_number > MAX_GAME_NUMBER {
        return Err(ApiError::invalid_field(
            "game_number",
            format!("{game_number} exceeds {MAX_GAME_NUMBER} and would lose precision"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::invalid_field(field, format!("{value} is not a non-negative amount")));
    }
    Ok(())
}
