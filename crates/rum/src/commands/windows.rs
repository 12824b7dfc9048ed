use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use rum_core::{Automation, Rect, WindowHandle};
use rum_windows::Win32Platform;

#[derive(Serialize)]
struct WindowRow {
    handle: WindowHandle,
    pid: u32,
    executable: Option<String>,
    path: Option<String>,
    rect: Rect,
}

/// Lists every top-level window with its process and bounds.
pub fn execute(automation: &Automation<Win32Platform>, json: bool) {
    let mut rows = Vec::new();
    let count = automation.enumerate_windows(|handle| {
        let module = automation.module_info(handle);
        let (executable, path) = if module.is_empty() {
            (None, None)
        } else {
            (Some(module.executable_name), Some(module.executable_path))
        };
        rows.push(WindowRow {
            handle,
            pid: automation.process_id(handle),
            executable,
            path,
            rect: automation.window_rect(handle),
        });
    });

    if json {
        match serde_json::to_string_pretty(&rows) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("PID").set_alignment(CellAlignment::Right),
            Cell::new("Executable"),
            Cell::new("Left").set_alignment(CellAlignment::Right),
            Cell::new("Top").set_alignment(CellAlignment::Right),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
        ]);

    for row in &rows {
        table.add_row(vec![
            Cell::new(row.handle),
            Cell::new(row.pid).set_alignment(CellAlignment::Right),
            Cell::new(row.executable.as_deref().unwrap_or("-")),
            Cell::new(row.rect.left).set_alignment(CellAlignment::Right),
            Cell::new(row.rect.top).set_alignment(CellAlignment::Right),
            Cell::new(row.rect.width()).set_alignment(CellAlignment::Right),
            Cell::new(row.rect.height()).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
    println!("\n{count} windows found");
}

/// Brings the given window to the foreground.
pub fn show(automation: &Automation<Win32Platform>, window: &str) {
    let handle = match window.parse::<WindowHandle>() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error: invalid window handle '{window}': {e}");
            std::process::exit(1);
        }
    };

    if automation.show_foreground(handle) {
        println!("Activated {handle}");
    } else {
        eprintln!("Error: could not activate {handle}.");
        std::process::exit(1);
    }
}

/// Prints the console window of this process, `0x0` when there is none.
pub fn console(automation: &Automation<Win32Platform>) {
    println!("{}", automation.console_window());
}
