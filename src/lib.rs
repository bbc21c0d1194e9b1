//! Rust client for the Hand2Note poker tracker integration API.
//!
//! Hand2Note shows HUDs over poker tables. Rooms it cannot parse on its own
//! are integrated by streaming hand data into it through the native
//! `h2napi.dll`. This crate wraps that library with typed messages, up-front
//! validation and a background liveness monitor.
//!
//! # Features
//!
//! - **Typed messages**: hand starts, actions, streets and completed hand
//!   histories as plain Rust values
//! - **Fail fast**: malformed messages are rejected before any native call
//! - **Liveness monitoring**: edge-triggered `started` / `closed` callbacks
//!   plus a `tokio::sync::watch` view of the tracker state
//! - **Testable**: every native call goes through the [`TrackerApi`] trait
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hand2note::{Action, Hand2Note, HandActionMessage, HandStartMessage, Room, SeatInfo, Street, StreetMessage};
//!
//! # fn main() -> hand2note::Result<()> {
//! let h2n = Hand2Note::load()?;
//!
//! let game = 251_187_004;
//! h2n.send_hand_start(&HandStartMessage {
//!     table_name: h2n.make_table_name(Room::PokerStars, "Aldebaran IV")?,
//!     table_size: 6,
//!     small_blind: 0.5,
//!     big_blind: 1.0,
//!     seats: vec![
//!         SeatInfo::new(0, "villain", 100.0).dealer(),
//!         SeatInfo::new(3, "hero", 98.5).hero().with_pocket_cards("AsKd"),
//!     ],
//!     ..HandStartMessage::new(Room::PokerStars, game)
//! })?;
//! h2n.send_action(&HandActionMessage::new(game, 3, Action::Raise, 3.0))?;
//! h2n.send_street(&StreetMessage::new(game, Street::Flop, "Ah7d2c", 7.5))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Platform
//!
//! The native library only exists on Windows. On other platforms
//! [`Hand2Note::load`] returns [`ApiError::UnsupportedPlatform`], while
//! [`Hand2Note::with_api`] and the monitor work everywhere.

mod api;
mod client;
pub mod config;
mod error;
pub mod ffi;
pub mod marshal;
pub mod messages;
pub mod monitor;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

#[cfg(windows)]
pub mod windows;

pub use api::{ApiProbe, LivenessProbe, TrackerApi};
pub use client::Hand2Note;
pub use config::ClientConfig;
pub use error::*;
pub use messages::*;
pub use monitor::{LivenessMonitor, LivenessMonitorBuilder, Transition};
pub use types::*;

#[cfg(windows)]
pub use windows::NativeLibrary;
