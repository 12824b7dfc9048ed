use rum_windows::keys;

#[derive(clap::Args)]
pub struct SendKeyArgs {
    /// Key name (a, f5, enter, ctrl) or virtual-key code (0x41)
    pub key: String,
    /// Send a key release instead of a press
    #[arg(long)]
    pub up: bool,
    /// Hardware scan code; 0 leaves it unspecified
    #[arg(long, default_value_t = 0)]
    pub scan: u16,
    /// Force the extended-key flag (set automatically for navigation keys)
    #[arg(long)]
    pub extended: bool,
}

/// A key name resolved to its virtual-key code and extended flag.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedKey {
    pub virtual_key: u16,
    pub extended: bool,
}

/// Resolves a key name, marking keys that live on the extended block.
pub fn resolve(name: &str, force_extended: bool) -> Option<ResolvedKey> {
    let virtual_key = keys::vk_from_name(name)?;
    Some(ResolvedKey {
        virtual_key,
        extended: force_extended || keys::is_extended_key(virtual_key),
    })
}

#[cfg(windows)]
pub fn send(automation: &rum_core::Automation<rum_windows::Win32Platform>, args: &SendKeyArgs) {
    let key = resolve_or_exit(&args.key, args.extended);
    let accepted = automation.send_key(key.virtual_key, !args.up, args.scan, key.extended);
    report(accepted);
}

#[cfg(windows)]
pub fn tap(automation: &rum_core::Automation<rum_windows::Win32Platform>, name: &str) {
    let key = resolve_or_exit(name, false);
    let accepted = rum_core::KeyEvent::tap(key.virtual_key)
        .into_iter()
        .all(|event| automation.send_event(event.with_extended(key.extended)));
    report(accepted);
}

#[cfg(windows)]
fn resolve_or_exit(name: &str, force_extended: bool) -> ResolvedKey {
    match resolve(name, force_extended) {
        Some(key) => key,
        None => {
            eprintln!("Error: unknown key '{name}'.");
            std::process::exit(1);
        }
    }
}

#[cfg(windows)]
fn report(accepted: bool) {
    if !accepted {
        eprintln!("Error: the key event was rejected (is a higher-integrity window focused?).");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_resolve_without_extended_flag() {
        // Act
        let key = resolve("a", false);

        // Assert
        assert_eq!(
            key,
            Some(ResolvedKey {
                virtual_key: 0x41,
                extended: false
            })
        );
    }

    #[test]
    fn arrow_keys_are_marked_extended() {
        // Act
        let key = resolve("left", false).expect("left should resolve");

        // Assert
        assert_eq!(key.virtual_key, 0x25);
        assert!(key.extended);
    }

    #[test]
    fn extended_can_be_forced() {
        // Act
        let key = resolve("enter", true).expect("enter should resolve");

        // Assert
        assert!(key.extended);
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(resolve("not-a-key", false), None);
    }
}
