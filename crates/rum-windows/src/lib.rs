//! Win32 implementation of the Rum automation bridge.
//!
//! Everything except [`keys`] talks to the OS and only exists on Windows.

/// Clipboard change source backed by a message-only listener window.
#[cfg(windows)]
pub mod clipboard;

/// Console Ctrl+C handling.
#[cfg(windows)]
pub mod ctrl_c;

/// Confirmation dialogs.
#[cfg(windows)]
pub mod dialog;

/// Top-level window enumeration.
#[cfg(windows)]
pub mod enumerate;

/// Keyboard injection via `SendInput`.
#[cfg(windows)]
pub mod input;

/// Key name to virtual-key code mapping.
pub mod keys;

/// Screen size and work area.
#[cfg(windows)]
pub mod metrics;

/// The `Win32Platform` and bridge initialization.
#[cfg(windows)]
pub mod platform;

/// Process module lookup.
#[cfg(windows)]
pub mod process;

/// Modal text-input window.
#[cfg(windows)]
mod prompt;

/// Per-window queries and foreground activation.
#[cfg(windows)]
pub mod window;

#[cfg(windows)]
pub use clipboard::Win32Clipboard;
#[cfg(windows)]
pub use platform::{Win32Platform, initialize, initialize_with_lock, install_clipboard_watcher};
