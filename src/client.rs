//! High-level client for delivering poker data to Hand2Note.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ClientConfig, default_library_path};
use crate::marshal::{self, c_string};
use crate::monitor::{LivenessMonitor, LivenessMonitorBuilder};
use crate::{
    ApiError, Command, HandActionMessage, HandHistoryMessage, HandStartMessage, LivenessProbe,
    Result, Room, StreetMessage, TrackerApi,
};

/// Entry point of the crate: validated delivery of messages to Hand2Note.
///
/// Every `send_*` method validates its message, converts it to the native
/// layout and makes exactly one native call. A non-zero result code becomes
/// [`ApiError::Rejected`]; nothing is retried.
///
/// `Hand2Note` is cheap to clone; clones share the loaded library.
///
/// # Example
///
/// ```rust,no_run
/// use hand2note::{Action, Hand2Note, HandActionMessage};
///
/// # fn main() -> hand2note::Result<()> {
/// let h2n = Hand2Note::load()?;
/// if h2n.is_running()? {
///     h2n.send_action(&HandActionMessage::new(251_187_004, 3, Action::Raise, 2.5))?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Hand2Note {
    api: Arc<dyn TrackerApi>,
}

impl Hand2Note {
    /// Load `h2napi.dll` from its default architecture subdirectory.
    ///
    /// # Platform
    ///
    /// Only available on Windows; elsewhere this returns
    /// [`ApiError::UnsupportedPlatform`].
    pub fn load() -> Result<Self> {
        Self::load_from(default_library_path())
    }

    /// Load `h2napi.dll` from an explicit path.
    #[cfg(windows)]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_api(crate::windows::NativeLibrary::load(path)?))
    }

    /// Load `h2napi.dll` from an explicit path.
    #[cfg(not(windows))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "Native library needs Windows");
        Err(ApiError::unsupported_platform("Hand2Note API library", "Windows"))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::load_from(config.resolved_library_path())
    }

    /// Use a custom [`TrackerApi`] implementation, e.g. a test double.
    pub fn with_api(api: impl TrackerApi + 'static) -> Self {
        Self { api: Arc::new(api) }
    }

    pub fn from_shared(api: Arc<dyn TrackerApi>) -> Self {
        Self { api }
    }

    /// Whether the Hand2Note application is currently running.
    pub fn is_running(&self) -> Result<bool> {
        self.api.is_running()
    }

    /// Build the table name Hand2Note uses to identify `original_name` in `room`.
    ///
    /// The result is deterministic per room and name.
    pub fn make_table_name(&self, room: Room, original_name: &str) -> Result<String> {
        let original = c_string("original_name", original_name)?;
        self.api.make_table_name(room, &original)
    }

    /// Deliver a completed hand history.
    pub fn send_hand_history(&self, msg: &HandHistoryMessage) -> Result<()> {
        let mut payload = marshal::hand_history(msg)?;
        debug!(
            room = %msg.room,
            game_number = msg.game_number,
            format = %msg.format,
            "Sending hand history"
        );
        let code = self.api.send_hand_history(payload.raw_mut())?;
        check("h2n_send_handhistory", code)
    }

    /// Announce a new hand with its table and seats.
    pub fn send_hand_start(&self, msg: &HandStartMessage) -> Result<()> {
        let mut payload = marshal::hand_start(msg)?;
        debug!(
            room = %msg.room,
            game_number = msg.game_number,
            table = %msg.table_name,
            seats = msg.seats.len(),
            "Sending hand start"
        );
        let code = self.api.send_hand_start(payload.raw_mut())?;
        check("h2n_send_hand_start", code)
    }

    /// Report one player action in the current hand.
    pub fn send_action(&self, msg: &HandActionMessage) -> Result<()> {
        let mut payload = marshal::action(msg)?;
        debug!(
            game_number = msg.game_number,
            seat = msg.seat_index,
            action = %msg.action,
            amount = msg.amount,
            "Sending action"
        );
        let code = self.api.send_action(payload.raw_mut())?;
        check("h2n_send_action", code)
    }

    /// Report the start of a new street with its board cards.
    pub fn send_street(&self, msg: &StreetMessage) -> Result<()> {
        let mut payload = marshal::street(msg)?;
        debug!(
            game_number = msg.game_number,
            street = %msg.street,
            board = %msg.board,
            "Sending street"
        );
        let code = self.api.send_street(payload.raw_mut())?;
        check("h2n_send_street", code)
    }

    /// Forward a raw JSON message. The text must parse as JSON.
    pub fn send_json(&self, json: &str) -> Result<()> {
        serde_json::from_str::<serde::de::IgnoredAny>(json)?;
        let text = c_string("json", json)?;
        debug!(bytes = json.len(), "Sending JSON message");
        let code = self.api.send_json(&text)?;
        check("h2n_send_json", code)
    }

    /// Send an out-of-band command for the HUD of `table_window`.
    pub fn send_command(&self, table_window: i32, room: Room, command: Command) -> Result<()> {
        debug!(table_window, %room, %command, "Sending command");
        let code = self.api.send_command(table_window, room.wire(), command.wire())?;
        check("h2n_send_command", code)
    }

    /// Shut down the HUD of a table whose window stays open after the
    /// player left it.
    pub fn close_hud(&self, table_window: i32) -> Result<()> {
        debug!(table_window, "Sending close HUD");
        let code = self.api.send_command(table_window, 0, Command::CloseHud.wire())?;
        check("h2n_send_command", code)
    }

    /// Start a liveness monitor polling this client.
    pub fn spawn_monitor(&self, builder: LivenessMonitorBuilder) -> Result<LivenessMonitor> {
        builder.spawn(self.clone())
    }
}

fn check(operation: &'static str, code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        warn!(operation, code, "Hand2Note rejected delivery");
        Err(ApiError::rejected(operation, code))
    }
}

impl LivenessProbe for Hand2Note {
    fn probe(&self) -> Result<bool> {
        self.is_running()
    }
}

impl std::fmt::Debug for Hand2Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hand2Note").finish_non_exhaustive()
    }
}
