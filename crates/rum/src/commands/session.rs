use rum_core::{Automation, config, log};
use rum_windows::Win32Platform;

/// Loads config, starts logging and initializes the bridge.
///
/// Exits the process when initialization fails.
pub fn open(log_level: Option<&str>) -> Automation<Win32Platform> {
    let mut config = config::load();
    if let Some(level) = log_level {
        config.log.level = level.to_string();
    }

    if let Err(e) = log::init(&config.log) {
        eprintln!("Warning: {e}");
    }

    match rum_windows::initialize(config) {
        Ok(automation) => automation,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
