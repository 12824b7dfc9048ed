use rum_core::{Rect, WindowHandle};
use tracing::debug;
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::System::Console::GetConsoleWindow;
use windows::Win32::System::Threading::AttachThreadInput;
use windows::Win32::UI::WindowsAndMessaging::{
    BringWindowToTop, GetForegroundWindow, GetWindowRect, GetWindowThreadProcessId, IsIconic,
    SW_RESTORE, SetForegroundWindow, ShowWindow,
};

/// Converts a core handle to a Win32 `HWND`.
pub(crate) fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.as_raw() as *mut _)
}

/// Converts a Win32 `HWND` to a core handle.
pub(crate) fn to_handle(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as usize)
}

/// Id of the process that created the window, `0` for a stale handle.
pub fn process_id(window: WindowHandle) -> u32 {
    let mut pid = 0u32;
    // SAFETY: GetWindowThreadProcessId only reads window state and
    // writes the pid into our local. It returns 0 for invalid handles.
    unsafe { GetWindowThreadProcessId(to_hwnd(window), Some(&mut pid)) };
    pid
}

/// Bounding rectangle including the non-client area.
pub fn window_rect(window: WindowHandle) -> Rect {
    let mut rect = RECT::default();

    // SAFETY: GetWindowRect fills our local RECT; it fails cleanly for
    // a window that no longer exists.
    match unsafe { GetWindowRect(to_hwnd(window), &mut rect) } {
        Ok(()) => Rect::new(rect.top, rect.left, rect.right, rect.bottom),
        Err(e) => {
            debug!("GetWindowRect {window} failed: {e}");
            Rect::ZERO
        }
    }
}

/// The console window of this process, or a null handle.
pub fn console_window() -> WindowHandle {
    // SAFETY: GetConsoleWindow takes no arguments and returns NULL when
    // the process has no console.
    to_handle(unsafe { GetConsoleWindow() })
}

/// Brings a window to the foreground, working around the foreground lock.
///
/// Windows only lets the process that owns the foreground hand it over.
/// When a plain `SetForegroundWindow` is refused, the input queue of
/// `owner_thread` is attached to the foreground thread's for the retry,
/// then detached again.
pub fn show_foreground(window: WindowHandle, owner_thread: u32) -> bool {
    let target = to_hwnd(window);

    // SAFETY: every call below accepts any HWND value and fails without
    // side effects when the window is gone. Attach/detach are paired.
    unsafe {
        if GetWindowThreadProcessId(target, None) == 0 {
            debug!("show_foreground: {window} no longer exists");
            return false;
        }

        if IsIconic(target).as_bool() {
            let _ = ShowWindow(target, SW_RESTORE);
        }

        if GetForegroundWindow() == target {
            return true;
        }

        if SetForegroundWindow(target).as_bool() && GetForegroundWindow() == target {
            return true;
        }

        let foreground_thread = GetWindowThreadProcessId(GetForegroundWindow(), None);
        let attached = foreground_thread != 0
            && foreground_thread != owner_thread
            && AttachThreadInput(owner_thread, foreground_thread, true).as_bool();

        let _ = SetForegroundWindow(target);
        let _ = BringWindowToTop(target);

        if attached {
            let _ = AttachThreadInput(owner_thread, foreground_thread, false);
        }

        let raised = GetForegroundWindow() == target;
        debug!("show_foreground {window}: attached={attached} raised={raised}");
        raised
    }
}
