use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::Rect;

/// Suffix stripped from module names to produce the executable name.
pub const EXE_SUFFIX: &str = ".exe";

/// An opaque handle to a top-level window.
///
/// The OS assigns the value; this crate only references it. A handle
/// stays meaningful only while the window exists, so every query made
/// with it must tolerate the window having vanished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// The "no window" handle.
    pub const NULL: Self = Self(0);

    /// Wraps a raw pointer-sized handle value.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn as_raw(self) -> usize {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Parses `0x`-prefixed hex (as printed by `Display`) or plain decimal.
impl FromStr for WindowHandle {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => usize::from_str_radix(hex, 16)?,
            None => s.parse()?,
        };
        Ok(Self(raw))
    }
}

/// The primary module of the process that owns a window.
///
/// `Default` (both fields empty) is returned when the process has exited
/// or its modules cannot be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessModuleInfo {
    /// Full path of the executable, e.g. `C:\Windows\notepad.exe`.
    pub executable_path: String,
    /// Module name without the `.exe` suffix, e.g. `notepad`.
    pub executable_name: String,
}

impl ProcessModuleInfo {
    /// Builds the info from a module snapshot entry.
    pub fn from_module(executable_path: String, module_name: &str) -> Self {
        Self {
            executable_path,
            executable_name: strip_exe_suffix(module_name).to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.executable_path.is_empty() && self.executable_name.is_empty()
    }
}

/// Removes a trailing `.exe` (ASCII case-insensitive) from a module name.
///
/// Names shorter than the suffix, or not ending in it, are returned
/// unchanged.
pub fn strip_exe_suffix(name: &str) -> &str {
    let Some(cut) = name.len().checked_sub(EXE_SUFFIX.len()) else {
        return name;
    };
    match name.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(EXE_SUFFIX) => &name[..cut],
        _ => name,
    }
}

/// Read-only window queries plus foreground raising.
///
/// Each platform crate (e.g. `rum-windows`) provides its own
/// implementation. None of these methods fail: an invalid handle yields
/// the sentinel documented on each method.
pub trait WindowSystem {
    /// Snapshots the handles of all top-level windows, in OS order.
    ///
    /// Returns an empty list when there are no windows or the OS
    /// enumeration fails.
    fn window_handles(&self) -> Vec<WindowHandle>;

    /// Id of the process owning the window, `0` if unknown.
    fn process_id(&self, window: WindowHandle) -> u32;

    /// Primary module of the owning process.
    fn module_info(&self, window: WindowHandle) -> ProcessModuleInfo;

    /// Bounding rectangle, [`Rect::ZERO`] on failure.
    fn window_rect(&self, window: WindowHandle) -> Rect;

    /// Brings the window to the foreground. Returns whether it worked.
    fn show_foreground(&self, window: WindowHandle) -> bool;

    /// The console window attached to this process, or [`WindowHandle::NULL`].
    fn console_window(&self) -> WindowHandle;
}
