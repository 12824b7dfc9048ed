use std::ffi::c_void;
use std::sync::atomic::{AtomicBool, Ordering};

use rum_core::{
    Automation, ClipboardWatcher, Config, DialogHost, DialogRequest, DialogResponse, Error,
    HostLock, InputSink, KeyEvent, MetricsReader, NoHostLock, ProcessModuleInfo, Rect, Result,
    WindowHandle, WindowSystem,
};
use tracing::{info, warn};
use windows::Win32::Foundation::{ERROR_CLASS_ALREADY_EXISTS, GetLastError, HINSTANCE};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{RegisterClassW, WNDCLASSW};

use crate::clipboard::Win32Clipboard;
use crate::{dialog, enumerate, input, metrics, process, window};

/// The live Win32 desktop.
///
/// Holds the module instance used to register the prompt and clipboard
/// window classes, and the id of the thread that initialized the bridge.
/// That thread is the one attached to the foreground thread's input queue
/// when focus has to be forced.
#[derive(Debug)]
pub struct Win32Platform {
    // Kept as an address so the platform can move to the offload worker.
    instance: usize,
    thread_id: u32,
}

impl Win32Platform {
    /// Performs the one-time process setup.
    pub fn new() -> Result<Self> {
        // SAFETY: a null module name returns the handle of the running exe.
        let module = unsafe { GetModuleHandleW(None) }
            .map_err(|e| Error::Init(format!("GetModuleHandleW failed: {e}")))?;

        // SAFETY: pure query.
        let thread_id = unsafe { GetCurrentThreadId() };

        Ok(Self {
            instance: module.0 as usize,
            thread_id,
        })
    }

    pub fn instance(&self) -> HINSTANCE {
        HINSTANCE(self.instance as *mut c_void)
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }
}

impl WindowSystem for Win32Platform {
    fn window_handles(&self) -> Vec<WindowHandle> {
        enumerate::window_handles()
    }

    fn process_id(&self, window: WindowHandle) -> u32 {
        window::process_id(window)
    }

    fn module_info(&self, window: WindowHandle) -> ProcessModuleInfo {
        match window::process_id(window) {
            0 => ProcessModuleInfo::default(),
            pid => process::module_info(pid),
        }
    }

    fn window_rect(&self, window: WindowHandle) -> Rect {
        window::window_rect(window)
    }

    fn show_foreground(&self, window: WindowHandle) -> bool {
        window::show_foreground(window, self.thread_id)
    }

    fn console_window(&self) -> WindowHandle {
        window::console_window()
    }
}

impl InputSink for Win32Platform {
    fn inject(&self, event: &KeyEvent) -> bool {
        input::inject(event)
    }
}

impl DialogHost for Win32Platform {
    fn present(&self, request: &DialogRequest) -> DialogResponse {
        dialog::present(request, self.instance())
    }
}

impl MetricsReader for Win32Platform {
    fn screen_width(&self) -> i32 {
        metrics::screen_width()
    }

    fn screen_height(&self) -> i32 {
        metrics::screen_height()
    }

    fn desktop_work_area(&self) -> Rect {
        metrics::desktop_work_area()
    }
}

/// Initializes the bridge for a host that holds no lock of its own.
pub fn initialize(config: Config) -> Result<Automation<Win32Platform>> {
    initialize_with_lock(config, NoHostLock)
}

/// Initializes the bridge, releasing `lock` around every blocking call.
///
/// Fails with [`Error::Init`] when process setup fails; the host should
/// refuse to load in that case.
pub fn initialize_with_lock<L: HostLock>(
    config: Config,
    lock: L,
) -> Result<Automation<Win32Platform, L>> {
    let platform = Win32Platform::new()?;
    info!(
        "automation bridge initialized on thread {} (offload: {})",
        platform.thread_id(),
        config.bridge.offload
    );
    Automation::new(platform, lock, config)
}

/// Installs a clipboard watcher on the calling thread.
///
/// The watcher's listener window belongs to this thread, so the returned
/// watcher must be evaluated here too.
pub fn install_clipboard_watcher<L: HostLock>(
    automation: &Automation<Win32Platform, L>,
) -> Result<ClipboardWatcher<Win32Clipboard>> {
    let source = Win32Clipboard::new(automation.platform().instance());
    let mut watcher = ClipboardWatcher::new(source, automation.config().clipboard.reinstall);
    watcher.install()?;
    Ok(watcher)
}

/// Maps a Win32 error into the bridge's error type.
pub(crate) fn os_error(e: windows::core::Error) -> Error {
    Error::Os(e.to_string())
}

/// Registers a window class once per process.
///
/// Only success is remembered in `registered`, so a failed registration
/// is attempted again on the next call. A class that already exists
/// counts as registered.
pub(crate) fn register_window_class(registered: &AtomicBool, class: &WNDCLASSW) -> bool {
    if registered.load(Ordering::Acquire) {
        return true;
    }

    // SAFETY: RegisterClassW copies the class description; the error
    // code is read right after the failing call on the same thread.
    let ok = unsafe {
        RegisterClassW(class) != 0 || GetLastError() == ERROR_CLASS_ALREADY_EXISTS
    };

    if ok {
        registered.store(true, Ordering::Release);
    } else {
        warn!("Failed to register window class");
    }
    ok
}
