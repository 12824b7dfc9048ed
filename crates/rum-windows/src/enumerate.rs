use rum_core::WindowHandle;
use tracing::warn;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::window::to_handle;

/// Snapshots every top-level window handle, in `EnumWindows` order.
///
/// The whole list is collected before the caller sees any handle, so
/// whatever the caller then does with the windows cannot disturb the
/// OS walk. No filtering is applied: hidden and tool windows are
/// included.
pub fn window_handles() -> Vec<WindowHandle> {
    let mut handles: Vec<WindowHandle> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<WindowHandle>. This is safe because
    // EnumWindows runs synchronously: the Vec outlives the call.
    let result = unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )
    };

    if let Err(e) = result {
        warn!("EnumWindows failed: {e}");
        return Vec::new();
    }

    handles
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Always returns `TRUE` so the walk covers every window.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec, cast from window_handles().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<WindowHandle>) };
    handles.push(to_handle(hwnd));
    BOOL(1)
}
