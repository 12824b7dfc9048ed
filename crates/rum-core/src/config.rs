use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::clipboard::ReinstallPolicy;
use crate::log::LogConfig;
use crate::{Error, Result};

/// Largest prompt capacity accepted, in UTF-16 units.
pub const MAX_PROMPT_CHARS: usize = 32_767;

/// Top-level configuration for Rum.
///
/// Loaded from `~/.config/rum/config.toml`. Missing sections fall back
/// to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub clipboard: ClipboardConfig,
    pub dialog: DialogConfig,
    pub bridge: BridgeConfig,
}

/// Clipboard watcher settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Behaviour of `install` on an already installed watcher.
    pub reinstall: ReinstallPolicy,
}

/// Modal dialog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Default capacity of the text-input dialog, in UTF-16 units.
    pub prompt_max_chars: usize,
    /// Default title for dialogs opened without one.
    pub prompt_title: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            prompt_max_chars: 256,
            prompt_title: "Rum".into(),
        }
    }
}

/// Blocking-call bridge settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Run bridged calls on a dedicated worker thread instead of the
    /// calling thread.
    pub offload: bool,
}

impl Config {
    /// Clamps values to ranges the platform can honour.
    pub fn validate(&mut self) {
        self.dialog.prompt_max_chars = self.dialog.prompt_max_chars.clamp(1, MAX_PROMPT_CHARS);
    }
}

/// Returns the config directory: `~/.config/rum/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("rum"))
}

/// Returns the config file path: `~/.config/rum/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Parses and validates a configuration document.
pub fn parse(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
    config.validate();
    Ok(config)
}

/// Tries to load and parse `config.toml`.
pub fn try_load() -> Result<Config> {
    let path = config_path()
        .ok_or_else(|| Error::Config("could not determine config path".into()))?;
    let content = std::fs::read_to_string(&path)?;
    parse(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// If the file doesn't exist, returns defaults silently.
/// If the file exists but can't be parsed, prints a warning and returns
/// defaults. Logging is configured from this file, so it is not yet
/// available here.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

/// The default `config.toml`, with comments explaining every option.
pub fn template() -> String {
    let defaults = Config::default();
    format!(
        r#"# Rum configuration.

[log]
# Write logs to ~/.config/rum/logs/rum.log instead of stderr.
enabled = {log_enabled}
# Minimum level: "trace", "debug", "info", "warn" or "error".
level = "{log_level}"
# Rotate the log file to rum.log.1 past this size.
max_file_mb = {log_max}

[clipboard]
# Installing an installed watcher: "reset" re-reads the baseline,
# "reject" returns an error.
reinstall = "reset"

[dialog]
# Capacity of the text-input dialog, in UTF-16 units (1-{max_prompt}).
prompt_max_chars = {prompt_max}
prompt_title = "{prompt_title}"

[bridge]
# Run dialogs and key injection on a dedicated worker thread.
offload = {offload}
"#,
        log_enabled = defaults.log.enabled,
        log_level = defaults.log.level,
        log_max = defaults.log.max_file_mb,
        max_prompt = MAX_PROMPT_CHARS,
        prompt_max = defaults.dialog.prompt_max_chars,
        prompt_title = defaults.dialog.prompt_title,
        offload = defaults.bridge.offload,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        // Arrange / Act
        let config = Config::default();

        // Assert
        assert!(!config.log.enabled);
        assert_eq!(config.clipboard.reinstall, ReinstallPolicy::Reset);
        assert_eq!(config.dialog.prompt_max_chars, 256);
        assert!(!config.bridge.offload);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[clipboard]\nreinstall = \"reject\"\n";

        // Act
        let config = parse(toml_str).unwrap();

        // Assert
        assert_eq!(config.clipboard.reinstall, ReinstallPolicy::Reject);
        assert_eq!(config.dialog.prompt_title, "Rum");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn prompt_capacity_is_clamped() {
        // Act
        let zero = parse("[dialog]\nprompt_max_chars = 0\n").unwrap();
        let huge = parse("[dialog]\nprompt_max_chars = 1000000\n").unwrap();

        // Assert
        assert_eq!(zero.dialog.prompt_max_chars, 1);
        assert_eq!(huge.dialog.prompt_max_chars, MAX_PROMPT_CHARS);
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        // Act
        let result = parse("[clipboard]\nreinstall = \"sometimes\"\n");

        // Assert
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn template_parses_to_defaults() {
        // Act
        let config = parse(&template()).unwrap();

        // Assert
        let defaults = Config::default();
        assert_eq!(config.dialog.prompt_max_chars, defaults.dialog.prompt_max_chars);
        assert_eq!(config.clipboard.reinstall, defaults.clipboard.reinstall);
        assert_eq!(config.log.max_file_mb, defaults.log.max_file_mb);
    }
}
