//! Wire-significant enumerations of the Hand2Note API.
//!
//! Every enum here is a closed set whose discriminants are the integer values
//! defined by `h2napi.h`. They are sent across the C boundary as-is, so the
//! values must never be renumbered.
//!
//! - [`Room`] identifies the poker room (network) of a table
//! - [`Currency`] is the currency of the stakes
//! - [`Action`] is the kind of an in-hand action
//! - [`Street`] is a betting round, valued by visible board cards
//! - [`HandHistoryFormat`] is the text format of a completed hand
//! - [`Command`] is an out-of-band HUD command
//!
//! ```rust
//! use hand2note::{Room, Street};
//!
//! assert_eq!(Room::PokerStars.wire(), 10);
//! assert_eq!(Street::from_wire(4), Some(Street::Turn));
//! ```

mod action;
mod command;
mod currency;
mod hand_history_format;
mod room;
mod street;

pub use action::Action;
pub use command::Command;
pub use currency::Currency;
pub use hand_history_format::HandHistoryFormat;
pub use room::Room;
pub use street::Street;
