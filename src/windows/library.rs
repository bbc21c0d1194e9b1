//! Dynamic binding to `h2napi.dll`.

use std::ffi::{CStr, OsStr};
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, trace, warn};
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows::core::{PCWSTR, s};

use crate::{ApiError, Result, Room, TrackerApi, ffi};

/// Resolve one export and cast it to its declared C signature.
macro_rules! export {
    ($module:expr, $name:literal, $ty:ty) => {{
        let proc = unsafe { GetProcAddress($module, s!($name)) }
            .ok_or(ApiError::MissingExport { symbol: $name })?;
        // SAFETY: the export has the signature declared in h2napi.h.
        unsafe { std::mem::transmute::<unsafe extern "system" fn() -> isize, $ty>(proc) }
    }};
}

struct Exports {
    is_running: ffi::h2n_is_running,
    make_table_name: ffi::h2n_make_table_name,
    free_cstring: ffi::h2n_free_cstring,
    send_handhistory: ffi::h2n_send_handhistory,
    send_hand_start: ffi::h2n_send_hand_start,
    send_action: ffi::h2n_send_action,
    send_street: ffi::h2n_send_street,
    send_json: ffi::h2n_send_json,
    send_command: ffi::h2n_send_command,
}

impl Exports {
    fn resolve(module: HMODULE) -> Result<Self> {
        Ok(Self {
            is_running: export!(module, "h2n_is_running", ffi::h2n_is_running),
            make_table_name: export!(module, "h2n_make_table_name", ffi::h2n_make_table_name),
            free_cstring: export!(module, "h2n_free_cstring", ffi::h2n_free_cstring),
            send_handhistory: export!(module, "h2n_send_handhistory", ffi::h2n_send_handhistory),
            send_hand_start: export!(module, "h2n_send_hand_start", ffi::h2n_send_hand_start),
            send_action: export!(module, "h2n_send_action", ffi::h2n_send_action),
            send_street: export!(module, "h2n_send_street", ffi::h2n_send_street),
            send_json: export!(module, "h2n_send_json", ffi::h2n_send_json),
            send_command: export!(module, "h2n_send_command", ffi::h2n_send_command),
        })
    }
}

/// Module handle released with `FreeLibrary` on drop.
struct Module(HMODULE);

impl Drop for Module {
    fn drop(&mut self) {
        if let Err(e) = unsafe { FreeLibrary(self.0) } {
            warn!(error = %e, "FreeLibrary failed for h2napi.dll");
        }
    }
}

/// Loaded `h2napi.dll` with every export resolved.
///
/// Calls into the library are serialized behind one lock.
pub struct NativeLibrary {
    exports: Exports,
    call_lock: Mutex<()>,
    path: PathBuf,
    // Declared last so the module outlives every use of `exports`.
    _module: Module,
}

impl NativeLibrary {
    /// Load the library at `path` and resolve all exports.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())
            .map_err(|source| ApiError::file_error(path.as_ref().to_path_buf(), source))?;
        if !path.is_file() {
            return Err(ApiError::LibraryNotFound { path });
        }

        trace!(path = %path.display(), "Loading Hand2Note API library");
        let wide = wide_string(path.as_os_str());
        let module = unsafe { LoadLibraryW(PCWSTR::from_raw(wide.as_ptr())) }
            .map_err(|e| ApiError::windows_api_error("LoadLibraryW", e))?;
        let module = Module(module);

        let exports = Exports::resolve(module.0)?;
        info!(path = %path.display(), "Loaded Hand2Note API library");

        Ok(Self { exports, call_lock: Mutex::new(()), path, _module: module })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.call_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TrackerApi for NativeLibrary {
    fn is_running(&self) -> Result<bool> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.is_running)() } != 0)
    }

    fn make_table_name(&self, room: Room, original_name: &CStr) -> Result<String> {
        let _guard = self.lock();
        let raw = unsafe { (self.exports.make_table_name)(room.wire(), original_name.as_ptr()) };
        if raw.is_null() {
            return Err(ApiError::rejected("h2n_make_table_name", -1));
        }
        // SAFETY: a non-null result is a NUL-terminated string owned by the
        // library until it is passed to h2n_free_cstring.
        let name = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        unsafe { (self.exports.free_cstring)(raw) };
        debug!(%room, table_name = %name, "Built table name");
        Ok(name)
    }

    fn send_hand_history(&self, msg: &mut ffi::h2n_hh_message) -> Result<i32> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.send_handhistory)(msg) })
    }

    fn send_hand_start(&self, msg: &mut ffi::h2n_start_hand_message) -> Result<i32> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.send_hand_start)(msg) })
    }

    fn send_action(&self, msg: &mut ffi::h2n_action_message) -> Result<i32> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.send_action)(msg) })
    }

    fn send_street(&self, msg: &mut ffi::h2n_street_message) -> Result<i32> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.send_street)(msg) })
    }

    fn send_json(&self, json: &CStr) -> Result<i32> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.send_json)(json.as_ptr()) })
    }

    fn send_command(&self, table_window: i32, room: i32, command: i32) -> Result<i32> {
        let _guard = self.lock();
        Ok(unsafe { (self.exports.send_command)(table_window, room, command) })
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary").field("path", &self.path).finish_non_exhaustive()
    }
}

// SAFETY: the module handle and function pointers are process-global and
// every call goes through `call_lock`.
unsafe impl Send for NativeLibrary {}
unsafe impl Sync for NativeLibrary {}

/// Convert to a null-terminated wide string for Windows APIs
fn wide_string(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}
