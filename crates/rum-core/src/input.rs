/// `KEYEVENTF_EXTENDEDKEY`: the scan code is preceded by `0xE0`.
pub const KEYEVENTF_EXTENDEDKEY: u32 = 0x0001;

/// `KEYEVENTF_KEYUP`: the key is being released.
pub const KEYEVENTF_KEYUP: u32 = 0x0002;

/// One synthetic hardware key event.
///
/// This is a single transition, not a press/release pair; see
/// [`KeyEvent::tap`] for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub virtual_key: u16,
    /// Hardware scan code, `0` when unspecified.
    pub scan_code: u16,
    pub key_up: bool,
    pub extended: bool,
}

impl KeyEvent {
    /// A key-down (`down == true`) or key-up event without scan code.
    pub fn new(virtual_key: u16, down: bool) -> Self {
        Self {
            virtual_key,
            scan_code: 0,
            key_up: !down,
            extended: false,
        }
    }

    pub fn with_scan_code(mut self, scan_code: u16) -> Self {
        self.scan_code = scan_code;
        self
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// The press followed by the release of `virtual_key`.
    pub fn tap(virtual_key: u16) -> [Self; 2] {
        [Self::new(virtual_key, true), Self::new(virtual_key, false)]
    }

    /// The `dwFlags` bitmask for this event.
    ///
    /// A key-down event carries no flag at all; key-up and extended are
    /// independent bits.
    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.key_up {
            flags |= KEYEVENTF_KEYUP;
        }
        if self.extended {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        flags
    }
}

/// Injects synthetic input into the system input queue.
pub trait InputSink {
    /// Submits one key event. Returns whether the OS accepted it.
    ///
    /// Acceptance means the event was queued, not that any window
    /// consumed it.
    fn inject(&self, event: &KeyEvent) -> bool;
}
