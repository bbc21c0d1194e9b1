//! Windows binding to the native Hand2Note API.
//!
//! `h2napi.dll` is loaded at runtime with `LoadLibraryW` and every export is
//! resolved up front, so a missing or outdated library fails at load time
//! instead of on the first delivery. The library ships in two builds and the
//! one matching the process architecture must be used:
//!
//! ```text
//! x64\h2napi.dll   64-bit processes
//! x86\h2napi.dll   32-bit processes
//! ```
//!
//! [`NativeLibrary`] implements [`crate::TrackerApi`]; most code should go
//! through [`crate::Hand2Note`] instead of using it directly.

mod library;

pub use library::NativeLibrary;
