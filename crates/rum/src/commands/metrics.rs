use rum_core::{Automation, DesktopMetrics};
use rum_windows::Win32Platform;

pub fn execute(automation: &Automation<Win32Platform>, json: bool) {
    let metrics = DesktopMetrics::read(automation.platform());

    if json {
        match serde_json::to_string_pretty(&metrics) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let area = metrics.work_area;
    println!("Screen:    {}x{}", metrics.screen_width, metrics.screen_height);
    if area.is_zero() {
        println!("Work area: unavailable");
        return;
    }
    println!(
        "Work area: {}x{} at ({}, {})",
        area.width(),
        area.height(),
        area.left,
        area.top
    );
}
