use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use rum_core::Automation;
use rum_windows::{Win32Platform, ctrl_c};
use tracing::info;

/// Polls the clipboard watcher and prints every change until Ctrl+C.
pub fn watch(automation: &Automation<Win32Platform>, interval_ms: u64) {
    let stop = match ctrl_c::install_stop_flag() {
        Ok(flag) => flag,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut watcher = match rum_windows::install_clipboard_watcher(automation) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: could not watch the clipboard: {e}");
            std::process::exit(1);
        }
    };

    println!("Watching the clipboard. Press Ctrl+C to stop.");
    let interval = Duration::from_millis(interval_ms.max(1));

    while !stop.load(Ordering::SeqCst) {
        let result = watcher.evaluate(|change| match change.text {
            Some(text) => println!("[{}] {text}", change.sequence),
            None => println!("[{}] (no text)", change.sequence),
        });
        if let Err(e) = result {
            eprintln!("Error: {e}");
            break;
        }
        thread::sleep(interval);
    }

    watcher.uninstall();
    info!("clipboard watch stopped");
}
