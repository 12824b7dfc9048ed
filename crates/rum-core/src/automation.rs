use std::sync::Arc;

use tracing::{debug, warn};

use crate::bridge::{self, HostLock, NoHostLock};
use crate::config::{Config, MAX_PROMPT_CHARS};
use crate::dialog::{DialogHost, DialogOutcome, DialogRequest, DialogResponse, truncate_utf16};
use crate::input::{InputSink, KeyEvent};
use crate::metrics::MetricsReader;
use crate::window::{ProcessModuleInfo, WindowHandle, WindowSystem};
use crate::worker::{BlockingWorker, Pending};
use crate::{Error, Rect, Result};

/// Everything a platform must provide.
pub trait Platform: WindowSystem + InputSink + DialogHost + MetricsReader {}

impl<T: WindowSystem + InputSink + DialogHost + MetricsReader> Platform for T {}

/// The automation context handed to the host.
///
/// Created once by the platform crate's `initialize` after one-time
/// process setup succeeded. Window, metrics and enumeration queries run
/// directly on the calling thread; input injection and dialogs go
/// through the blocking-call bridge, with the host lock released.
///
/// No method here fails: OS failures come back as `false`, an empty
/// string, [`Rect::ZERO`] or a failed [`DialogResponse`].
pub struct Automation<P, L = NoHostLock> {
    platform: Arc<P>,
    lock: L,
    config: Config,
    worker: Option<BlockingWorker>,
}

impl<P, L> Automation<P, L>
where
    P: Platform + Send + Sync + 'static,
    L: HostLock,
{
    /// Wraps an initialized platform.
    ///
    /// Starts the offload worker when `bridge.offload` is set.
    pub fn new(platform: P, lock: L, config: Config) -> Result<Self> {
        let worker = if config.bridge.offload {
            Some(BlockingWorker::spawn("rum-blocking")?)
        } else {
            None
        };

        Ok(Self {
            platform: Arc::new(platform),
            lock,
            config,
            worker,
        })
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -- Window enumeration and inspection --------------------------------

    /// Calls `visitor` once per top-level window and returns the count.
    ///
    /// Handles are snapshotted before the first visit, so the visitor may
    /// enumerate again or close windows without disturbing this walk. A
    /// visited handle may already be stale.
    pub fn enumerate_windows<F>(&self, mut visitor: F) -> usize
    where
        F: FnMut(WindowHandle),
    {
        let handles = self.platform.window_handles();
        let count = handles.len();
        for handle in handles {
            visitor(handle);
        }
        count
    }

    pub fn process_id(&self, window: WindowHandle) -> u32 {
        self.platform.process_id(window)
    }

    pub fn module_info(&self, window: WindowHandle) -> ProcessModuleInfo {
        self.platform.module_info(window)
    }

    /// Full path of the window's executable, empty on failure.
    pub fn executable_path(&self, window: WindowHandle) -> String {
        self.platform.module_info(window).executable_path
    }

    /// Executable name without `.exe`, empty on failure.
    pub fn executable_name(&self, window: WindowHandle) -> String {
        self.platform.module_info(window).executable_name
    }

    pub fn window_rect(&self, window: WindowHandle) -> Rect {
        self.platform.window_rect(window)
    }

    pub fn show_foreground(&self, window: WindowHandle) -> bool {
        self.platform.show_foreground(window)
    }

    pub fn console_window(&self) -> WindowHandle {
        self.platform.console_window()
    }

    // -- Metrics ----------------------------------------------------------

    pub fn screen_width(&self) -> i32 {
        self.platform.screen_width()
    }

    pub fn screen_height(&self) -> i32 {
        self.platform.screen_height()
    }

    pub fn desktop_work_area(&self) -> Rect {
        self.platform.desktop_work_area()
    }

    // -- Bridged calls ----------------------------------------------------

    /// Injects one key event. Returns whether the OS accepted it.
    pub fn send_key(&self, virtual_key: u16, down: bool, scan_code: u16, extended: bool) -> bool {
        let event = KeyEvent::new(virtual_key, down)
            .with_scan_code(scan_code)
            .with_extended(extended);
        self.send_event(event)
    }

    pub fn send_event(&self, event: KeyEvent) -> bool {
        let accepted = self
            .bridged(move |p: &P| p.inject(&event))
            .unwrap_or(false);
        if !accepted {
            warn!("key event rejected: {event:?}");
        }
        accepted
    }

    /// Shows an OK/Cancel dialog. True only if the user chose OK.
    pub fn confirm(&self, text: &str, title: &str) -> bool {
        let request = DialogRequest::confirmation(text, title);
        let response = self
            .bridged(move |p: &P| p.present(&request))
            .unwrap_or_else(DialogResponse::failed);
        debug!("confirm dialog returned status {}", response.status);
        response.outcome() == DialogOutcome::Ok
    }

    /// Shows a text-input dialog.
    ///
    /// `max_chars` is the capacity in UTF-16 units; `0` uses the
    /// configured default. The returned text never exceeds it.
    pub fn prompt_text(&self, text: &str, title: &str, max_chars: usize) -> DialogResponse {
        let max_chars = match max_chars {
            0 => self.config.dialog.prompt_max_chars,
            n => n.min(MAX_PROMPT_CHARS),
        };
        let request = DialogRequest::text_input(text, title, max_chars);
        let mut response = self
            .bridged(move |p: &P| p.present(&request))
            .unwrap_or_else(DialogResponse::failed);
        response.text = truncate_utf16(&response.text, max_chars);
        response
    }

    /// Submits an arbitrary platform call to the offload worker.
    ///
    /// The host polls the returned [`Pending`] from its own loop.
    pub fn offload<T, F>(&self, f: F) -> Result<Pending<T>>
    where
        F: FnOnce(&P) -> T + Send + 'static,
        T: Send + 'static,
    {
        let worker = self.worker.as_ref().ok_or(Error::OffloadDisabled)?;
        let platform = Arc::clone(&self.platform);
        worker.submit(move || f(&platform))
    }

    /// Runs `f` with the host lock released, on the worker if offloading.
    fn bridged<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&P) -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.worker.is_none() {
            return Some(bridge::run_blocking(&self.lock, f, &*self.platform));
        }

        let outcome = bridge::run_blocking(
            &self.lock,
            |pending: Result<Pending<T>>| pending.and_then(Pending::wait),
            self.offload(f),
        );
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("bridged call failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use super::*;
    use crate::dialog::{DialogKind, STATUS_CANCEL, STATUS_OK};
    use crate::input::KEYEVENTF_KEYUP;

    /// Host lock whose state the fake platform can observe.
    #[derive(Clone, Default)]
    struct FlagLock {
        released: Arc<AtomicBool>,
    }

    impl HostLock for FlagLock {
        fn release(&self) {
            self.released.store(true, Ordering::SeqCst);
        }

        fn reacquire(&self) {
            self.released.store(false, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct FakePlatform {
        windows: Vec<WindowHandle>,
        modules: HashMap<WindowHandle, ProcessModuleInfo>,
        rects: HashMap<WindowHandle, Rect>,
        accept_input: bool,
        injected: Mutex<Vec<(KeyEvent, bool)>>,
        replies: Mutex<VecDeque<DialogResponse>>,
        presented: Mutex<Vec<(DialogRequest, bool, Option<String>)>>,
        lock_state: Arc<AtomicBool>,
    }

    impl FakePlatform {
        fn with_lock(lock: &FlagLock) -> Self {
            Self {
                accept_input: true,
                lock_state: Arc::clone(&lock.released),
                ..Default::default()
            }
        }

        fn reply(self, response: DialogResponse) -> Self {
            self.replies.lock().unwrap().push_back(response);
            self
        }
    }

    impl WindowSystem for FakePlatform {
        fn window_handles(&self) -> Vec<WindowHandle> {
            self.windows.clone()
        }

        fn process_id(&self, window: WindowHandle) -> u32 {
            if self.modules.contains_key(&window) { 4242 } else { 0 }
        }

        fn module_info(&self, window: WindowHandle) -> ProcessModuleInfo {
            self.modules.get(&window).cloned().unwrap_or_default()
        }

        fn window_rect(&self, window: WindowHandle) -> Rect {
            self.rects.get(&window).copied().unwrap_or(Rect::ZERO)
        }

        fn show_foreground(&self, window: WindowHandle) -> bool {
            self.windows.contains(&window)
        }

        fn console_window(&self) -> WindowHandle {
            WindowHandle::NULL
        }
    }

    impl InputSink for FakePlatform {
        fn inject(&self, event: &KeyEvent) -> bool {
            let released = self.lock_state.load(Ordering::SeqCst);
            self.injected.lock().unwrap().push((*event, released));
            self.accept_input
        }
    }

    impl DialogHost for FakePlatform {
        fn present(&self, request: &DialogRequest) -> DialogResponse {
            let released = self.lock_state.load(Ordering::SeqCst);
            let thread_name = thread::current().name().map(str::to_string);
            self.presented
                .lock()
                .unwrap()
                .push((request.clone(), released, thread_name));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(DialogResponse::failed)
        }
    }

    impl MetricsReader for FakePlatform {
        fn screen_width(&self) -> i32 {
            1920
        }

        fn screen_height(&self) -> i32 {
            1080
        }

        fn desktop_work_area(&self) -> Rect {
            Rect::new(0, 0, 1920, 1040)
        }
    }

    fn automation(platform: FakePlatform, lock: FlagLock) -> Automation<FakePlatform, FlagLock> {
        Automation::new(platform, lock, Config::default()).unwrap()
    }

    fn offloading(platform: FakePlatform, lock: FlagLock) -> Automation<FakePlatform, FlagLock> {
        let mut config = Config::default();
        config.bridge.offload = true;
        Automation::new(platform, lock, config).unwrap()
    }

    #[test]
    fn empty_desktop_visits_nothing() {
        // Arrange
        let lock = FlagLock::default();
        let auto = automation(FakePlatform::with_lock(&lock), lock);
        let mut visits = 0;

        // Act
        let count = auto.enumerate_windows(|_| visits += 1);

        // Assert
        assert_eq!(count, 0);
        assert_eq!(visits, 0);
    }

    #[test]
    fn visitor_may_enumerate_again() {
        // Arrange
        let lock = FlagLock::default();
        let mut platform = FakePlatform::with_lock(&lock);
        platform.windows = (1..=3).map(WindowHandle::from_raw).collect();
        let auto = automation(platform, lock);
        let mut outer = Vec::new();
        let mut inner_total = 0;

        // Act
        auto.enumerate_windows(|handle| {
            outer.push(handle);
            inner_total += auto.enumerate_windows(|_| {});
        });

        // Assert
        assert_eq!(outer.len(), 3);
        assert_eq!(inner_total, 9);
    }

    #[test]
    fn inspector_degrades_to_sentinels() {
        // Arrange
        let lock = FlagLock::default();
        let mut platform = FakePlatform::with_lock(&lock);
        let known = WindowHandle::from_raw(0x10);
        platform.windows = vec![known];
        platform.modules.insert(
            known,
            ProcessModuleInfo::from_module(r"C:\Tools\emacs.exe".into(), "emacs.exe"),
        );
        platform.rects.insert(known, Rect::new(5, 10, 810, 605));
        let auto = automation(platform, lock);
        let gone = WindowHandle::from_raw(0x99);

        // Assert
        assert_eq!(auto.executable_name(known), "emacs");
        assert_eq!(auto.executable_path(known), r"C:\Tools\emacs.exe");
        assert_eq!(auto.window_rect(known).width(), 800);
        assert_eq!(auto.process_id(known), 4242);
        assert!(auto.show_foreground(known));

        assert_eq!(auto.executable_name(gone), "");
        assert_eq!(auto.executable_path(gone), "");
        assert_eq!(auto.window_rect(gone), Rect::ZERO);
        assert_eq!(auto.process_id(gone), 0);
        assert!(!auto.show_foreground(gone));
        assert!(auto.console_window().is_null());
    }

    #[test]
    fn metrics_pass_through() {
        // Arrange
        let lock = FlagLock::default();
        let auto = automation(FakePlatform::with_lock(&lock), lock);

        // Assert
        assert_eq!(auto.screen_width(), 1920);
        assert_eq!(auto.screen_height(), 1080);
        assert_eq!(auto.desktop_work_area().bottom, 1040);
    }

    #[test]
    fn send_key_runs_with_lock_released() {
        // Arrange
        let lock = FlagLock::default();
        let auto = automation(FakePlatform::with_lock(&lock), lock.clone());

        // Act
        let accepted = auto.send_key(0x41, false, 0x1E, false);

        // Assert
        assert!(accepted);
        assert!(!lock.released.load(Ordering::SeqCst), "lock reacquired");
        let injected = auto.platform().injected.lock().unwrap();
        let (event, released_during_call) = injected[0];
        assert!(released_during_call);
        assert_eq!(event.scan_code, 0x1E);
        assert_eq!(event.flags() & KEYEVENTF_KEYUP, KEYEVENTF_KEYUP);
    }

    #[test]
    fn rejected_injection_returns_false() {
        // Arrange
        let lock = FlagLock::default();
        let mut platform = FakePlatform::with_lock(&lock);
        platform.accept_input = false;
        let auto = automation(platform, lock);

        // Assert
        assert!(!auto.send_key(0x0D, true, 0, false));
    }

    #[test]
    fn confirm_true_only_for_ok() {
        // Arrange
        let lock = FlagLock::default();
        let platform = FakePlatform::with_lock(&lock)
            .reply(DialogResponse::new(STATUS_OK, ""))
            .reply(DialogResponse::new(STATUS_CANCEL, ""))
            .reply(DialogResponse::failed());
        let auto = automation(platform, lock);

        // Act
        let ok = auto.confirm("Proceed?", "Rum");
        let cancel = auto.confirm("Proceed?", "Rum");
        let dismissed = auto.confirm("Proceed?", "Rum");

        // Assert
        assert!(ok);
        assert!(!cancel);
        assert!(!dismissed);
        let presented = auto.platform().presented.lock().unwrap();
        assert!(presented.iter().all(|(req, released, _)| {
            req.kind == DialogKind::Confirmation && *released
        }));
    }

    #[test]
    fn prompt_truncates_to_capacity() {
        // Arrange
        let lock = FlagLock::default();
        let platform =
            FakePlatform::with_lock(&lock).reply(DialogResponse::new(STATUS_OK, "abcdefgh"));
        let auto = automation(platform, lock);

        // Act
        let response = auto.prompt_text("Name:", "Rum", 4);

        // Assert
        assert_eq!(response.status, STATUS_OK);
        assert_eq!(response.text, "abcd");
        let presented = auto.platform().presented.lock().unwrap();
        assert_eq!(presented[0].0.kind, DialogKind::TextInput { max_chars: 4 });
    }

    #[test]
    fn prompt_zero_capacity_uses_configured_default() {
        // Arrange
        let lock = FlagLock::default();
        let platform = FakePlatform::with_lock(&lock).reply(DialogResponse::new(STATUS_CANCEL, ""));
        let auto = automation(platform, lock);

        // Act
        let response = auto.prompt_text("Name:", "Rum", 0);

        // Assert
        assert_eq!(response.outcome(), DialogOutcome::Cancel);
        let presented = auto.platform().presented.lock().unwrap();
        assert_eq!(presented[0].0.kind, DialogKind::TextInput { max_chars: 256 });
    }

    #[test]
    fn offload_mode_runs_dialog_on_worker() {
        // Arrange
        let lock = FlagLock::default();
        let platform = FakePlatform::with_lock(&lock).reply(DialogResponse::new(STATUS_OK, ""));
        let auto = offloading(platform, lock.clone());

        // Act
        let ok = auto.confirm("Proceed?", "Rum");

        // Assert
        assert!(ok);
        assert!(!lock.released.load(Ordering::SeqCst));
        let presented = auto.platform().presented.lock().unwrap();
        let (_, released, thread_name) = &presented[0];
        assert!(*released, "host lock released while waiting on worker");
        assert_eq!(thread_name.as_deref(), Some("rum-blocking"));
    }

    #[test]
    fn offload_without_worker_is_rejected() {
        // Arrange
        let lock = FlagLock::default();
        let auto = automation(FakePlatform::with_lock(&lock), lock);

        // Act
        let result = auto.offload(|p: &FakePlatform| p.screen_width());

        // Assert
        assert!(matches!(result, Err(Error::OffloadDisabled)));
    }

    #[test]
    fn offloaded_call_is_polled_by_host() {
        // Arrange
        let lock = FlagLock::default();
        let auto = offloading(FakePlatform::with_lock(&lock), lock);

        // Act
        let pending = auto.offload(|p: &FakePlatform| p.screen_height()).unwrap();

        // Assert
        assert_eq!(pending.wait().unwrap(), 1080);
    }
}
