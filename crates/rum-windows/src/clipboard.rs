use std::sync::atomic::AtomicBool;

use rum_core::{ClipboardSource, Error, Result};
use tracing::{debug, warn};
use windows::Win32::Foundation::{HGLOBAL, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::DataExchange::{
    AddClipboardFormatListener, CloseClipboard, GetClipboardData, GetClipboardSequenceNumber,
    IsClipboardFormatAvailable, OpenClipboard, RemoveClipboardFormatListener,
};
use windows::Win32::System::Memory::{GlobalLock, GlobalSize, GlobalUnlock};
use windows::Win32::System::Ole::CF_UNICODETEXT;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_MESSAGE, MSG, PM_REMOVE, PeekMessageW,
    WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLIPBOARDUPDATE, WNDCLASSW,
};
use windows::core::{PCWSTR, w};

use crate::platform::{os_error, register_window_class};

const CLASS_NAME: PCWSTR = w!("RumClipboardListener");

/// The system clipboard, observed through a hidden listener window.
///
/// The listener is a message-only window registered with
/// `AddClipboardFormatListener`. Its `WM_CLIPBOARDUPDATE` messages are
/// only ever drained with `PeekMessageW`; change detection itself uses
/// the clipboard sequence number. The window belongs to the thread that
/// called `listen`, which is why this type is not `Send`.
pub struct Win32Clipboard {
    instance: HINSTANCE,
    listener: Option<HWND>,
}

impl Win32Clipboard {
    pub fn new(instance: HINSTANCE) -> Self {
        Self {
            instance,
            listener: None,
        }
    }

    fn create_listener(&self) -> Result<HWND> {
        if !register_class(self.instance) {
            return Err(Error::Os("could not register RumClipboardListener".into()));
        }

        // SAFETY: creates a message-only window (HWND_MESSAGE parent) of
        // our registered class. It is destroyed in `unlisten`.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                CLASS_NAME,
                w!("RumClipboardListener"),
                WINDOW_STYLE(0),
                0,
                0,
                0,
                0,
                Some(HWND_MESSAGE),
                None,
                Some(self.instance),
                None,
            )
        }
        .map_err(os_error)?;

        // SAFETY: hwnd is the window we just created.
        if let Err(e) = unsafe { AddClipboardFormatListener(hwnd) } {
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            return Err(os_error(e));
        }

        Ok(hwnd)
    }
}

impl ClipboardSource for Win32Clipboard {
    fn sequence(&self) -> u32 {
        // SAFETY: pure query; returns 0 without clipboard access.
        unsafe { GetClipboardSequenceNumber() }
    }

    fn listen(&mut self) -> Result<()> {
        if self.listener.is_none() {
            let hwnd = self.create_listener()?;
            debug!("clipboard listener window 0x{:X}", hwnd.0 as usize);
            self.listener = Some(hwnd);
        }
        Ok(())
    }

    fn unlisten(&mut self) {
        if let Some(hwnd) = self.listener.take() {
            // SAFETY: we registered and created this window in `listen`.
            unsafe {
                let _ = RemoveClipboardFormatListener(hwnd);
                let _ = DestroyWindow(hwnd);
            }
        }
    }

    fn drain_notifications(&mut self) -> usize {
        let Some(hwnd) = self.listener else {
            return 0;
        };

        let mut msg = MSG::default();
        let mut drained = 0;

        // SAFETY: PeekMessageW with PM_REMOVE never blocks; it only
        // removes WM_CLIPBOARDUPDATE messages addressed to our window.
        while unsafe {
            PeekMessageW(
                &mut msg,
                Some(hwnd),
                WM_CLIPBOARDUPDATE,
                WM_CLIPBOARDUPDATE,
                PM_REMOVE,
            )
        }
        .as_bool()
        {
            drained += 1;
        }
        drained
    }

    fn read_text(&self) -> Option<String> {
        // SAFETY: OpenClipboard/CloseClipboard are paired on every path
        // past a successful open; the global memory is locked only while
        // it is copied.
        unsafe {
            if let Err(e) = OpenClipboard(self.listener) {
                debug!("OpenClipboard failed: {e}");
                return None;
            }
            let text = read_unicode_text();
            let _ = CloseClipboard();
            text
        }
    }
}

impl Drop for Win32Clipboard {
    fn drop(&mut self) {
        self.unlisten();
    }
}

/// Copies `CF_UNICODETEXT` out of an open clipboard.
///
/// # Safety
///
/// The clipboard must be open on the calling thread.
unsafe fn read_unicode_text() -> Option<String> {
    let format = u32::from(CF_UNICODETEXT.0);
    unsafe {
        IsClipboardFormatAvailable(format).ok()?;
        let handle = GetClipboardData(format).ok()?;
        let memory = HGLOBAL(handle.0);

        let ptr = GlobalLock(memory) as *const u16;
        if ptr.is_null() {
            warn!("GlobalLock on clipboard text failed");
            return None;
        }

        let units = GlobalSize(memory) / 2;
        let slice = std::slice::from_raw_parts(ptr, units);
        let len = slice.iter().position(|&c| c == 0).unwrap_or(units);
        let text = String::from_utf16_lossy(&slice[..len]);

        let _ = GlobalUnlock(memory);
        Some(text)
    }
}

fn register_class(instance: HINSTANCE) -> bool {
    static REGISTERED: AtomicBool = AtomicBool::new(false);

    let wc = WNDCLASSW {
        lpfnWndProc: Some(listener_proc),
        hInstance: instance,
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };
    register_window_class(&REGISTERED, &wc)
}

/// WNDPROC for the listener window.
///
/// Clipboard updates are counted by `drain_notifications`, so every
/// message that reaches the procedure gets default handling.
unsafe extern "system" fn listener_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}
