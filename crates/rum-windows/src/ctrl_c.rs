//! Console stop signal using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use rum_core::Result;
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

use crate::platform::os_error;

/// Set once by the handler; polled by long-running commands.
static STOP: AtomicBool = AtomicBool::new(false);
static INSTALLED: OnceLock<()> = OnceLock::new();

/// Registers a Ctrl+C / Ctrl+Break handler and returns the flag it sets.
///
/// Safe to call more than once; the handler is registered only the first
/// time.
pub fn install_stop_flag() -> Result<&'static AtomicBool> {
    if INSTALLED.get().is_none() {
        unsafe { SetConsoleCtrlHandler(Some(handler), true) }.map_err(os_error)?;
        let _ = INSTALLED.set(());
    }
    Ok(&STOP)
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT {
        STOP.store(true, Ordering::SeqCst);
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
