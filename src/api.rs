//! Trait seams over the native Hand2Note API.

use std::ffi::CStr;
use std::sync::Arc;

use crate::ffi;
use crate::{Result, Room};

/// The exported functions of `h2napi`, one method per export.
///
/// [`crate::windows::NativeLibrary`] forwards each call to the DLL. Tests and
/// other platforms substitute their own implementation. Payload pointers are
/// valid only for the duration of the call.
///
/// `send_*` methods return the raw native result code (`0` = accepted).
/// `Err` is reserved for failures to reach the native layer at all.
pub trait TrackerApi: Send + Sync {
    /// `h2n_is_running`
    fn is_running(&self) -> Result<bool>;

    /// `h2n_make_table_name` followed by `h2n_free_cstring`
    fn make_table_name(&self, room: Room, original_name: &CStr) -> Result<String>;

    /// `h2n_send_handhistory`
    fn send_hand_history(&self, msg: &mut ffi::h2n_hh_message) -> Result<i32>;

    /// `h2n_send_hand_start`
    fn send_hand_start(&self, msg: &mut ffi::h2n_start_hand_message) -> Result<i32>;

    /// `h2n_send_action`
    fn send_action(&self, msg: &mut ffi::h2n_action_message) -> Result<i32>;

    /// `h2n_send_street`
    fn send_street(&self, msg: &mut ffi::h2n_street_message) -> Result<i32>;

    /// `h2n_send_json`
    fn send_json(&self, json: &CStr) -> Result<i32>;

    /// `h2n_send_command`
    fn send_command(&self, table_window: i32, room: i32, command: i32) -> Result<i32>;
}

impl<T: TrackerApi + ?Sized> TrackerApi for Arc<T> {
    fn is_running(&self) -> Result<bool> {
        (**self).is_running()
    }

    fn make_table_name(&self, room: Room, original_name: &CStr) -> Result<String> {
        (**self).make_table_name(room, original_name)
    }

    fn send_hand_history(&self, msg: &mut ffi::h2n_hh_message) -> Result<i32> {
        (**self).send_hand_history(msg)
    }

    fn send_hand_start(&self, msg: &mut ffi::h2n_start_hand_message) -> Result<i32> {
        (**self).send_hand_start(msg)
    }

    fn send_action(&self, msg: &mut ffi::h2n_action_message) -> Result<i32> {
        (**self).send_action(msg)
    }

    fn send_street(&self, msg: &mut ffi::h2n_street_message) -> Result<i32> {
        (**self).send_street(msg)
    }

    fn send_json(&self, json: &CStr) -> Result<i32> {
        (**self).send_json(json)
    }

    fn send_command(&self, table_window: i32, room: i32, command: i32) -> Result<i32> {
        (**self).send_command(table_window, room, command)
    }
}

/// Boolean "is the tracker running" check polled by [`crate::LivenessMonitor`].
///
/// Must be cheap and side-effect free. An `Err` means the state is unknown
/// for this poll; the monitor keeps its previous state and retries.
pub trait LivenessProbe: Send + Sync + 'static {
    fn probe(&self) -> Result<bool>;
}

impl<F> LivenessProbe for F
where
    F: Fn() -> Result<bool> + Send + Sync + 'static,
{
    fn probe(&self) -> Result<bool> {
        self()
    }
}

/// Adapter that probes any [`TrackerApi`] through `h2n_is_running`.
pub struct ApiProbe<A>(pub A);

impl<A: TrackerApi + 'static> LivenessProbe for ApiProbe<A> {
    fn probe(&self) -> Result<bool> {
        self.0.is_running()
    }
}
