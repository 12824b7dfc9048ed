use std::mem;

use rum_core::KeyEvent;
use tracing::debug;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, SendInput, VIRTUAL_KEY,
};

/// Queues one keyboard event with `SendInput`.
///
/// Returns whether the event was inserted into the input stream. The OS
/// refuses injection when input is blocked by another thread or when
/// UIPI shields a higher-integrity foreground window.
pub fn inject(event: &KeyEvent) -> bool {
    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(event.virtual_key),
                wScan: event.scan_code,
                dwFlags: KEYBD_EVENT_FLAGS(event.flags()),
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    // SAFETY: SendInput reads exactly one fully initialized INPUT; cbSize
    // is the size of that struct as required.
    let inserted = unsafe { SendInput(&[input], mem::size_of::<INPUT>() as i32) };

    debug!(
        "SendInput vk=0x{:02X} scan=0x{:02X} flags=0x{:X} -> {inserted}",
        event.virtual_key,
        event.scan_code,
        event.flags()
    );
    inserted == 1
}
