/// Converts a key name string to a Windows virtual key code.
///
/// Supports letters (A–Z), digits (0–9), function keys (F1–F24),
/// modifiers, and common named keys (Enter, Space, Tab, etc.).
/// Matching is case-insensitive. A `0x`-prefixed hex value is taken as a
/// raw virtual key code.
pub fn vk_from_name(name: &str) -> Option<u16> {
    let upper = name.to_ascii_uppercase();

    if let Some(hex) = upper.strip_prefix("0X") {
        return u16::from_str_radix(hex, 16).ok().filter(|vk| (1..=0xFE).contains(vk));
    }

    // Single letter A–Z or digit 0–9
    if upper.len() == 1 {
        let ch = upper.as_bytes()[0];
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            return Some(u16::from(ch));
        }
    }

    // Function keys F1–F24
    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u16>()
        && (1..=24).contains(&n)
    {
        return Some(0x70 + n - 1); // VK_F1 = 0x70
    }

    match upper.as_str() {
        // Editing
        "ENTER" | "RETURN" => Some(0x0D),
        "TAB" => Some(0x09),
        "ESCAPE" | "ESC" => Some(0x1B),
        "SPACE" => Some(0x20),
        "BACKSPACE" => Some(0x08),
        "DELETE" | "DEL" => Some(0x2E),
        "INSERT" | "INS" => Some(0x2D),

        // Navigation
        "HOME" => Some(0x24),
        "END" => Some(0x23),
        "PAGEUP" | "PGUP" => Some(0x21),
        "PAGEDOWN" | "PGDN" => Some(0x22),
        "LEFT" => Some(0x25),
        "UP" => Some(0x26),
        "RIGHT" => Some(0x27),
        "DOWN" => Some(0x28),

        // Modifiers
        "SHIFT" => Some(0x10),
        "CTRL" | "CONTROL" => Some(0x11),
        "ALT" | "MENU" => Some(0x12),
        "LSHIFT" => Some(0xA0),
        "RSHIFT" => Some(0xA1),
        "LCTRL" => Some(0xA2),
        "RCTRL" => Some(0xA3),
        "LALT" => Some(0xA4),
        "RALT" => Some(0xA5),
        "WIN" | "LWIN" => Some(0x5B),
        "RWIN" => Some(0x5C),
        "APPS" => Some(0x5D),

        // Locks and system
        "CAPSLOCK" => Some(0x14),
        "NUMLOCK" => Some(0x90),
        "SCROLLLOCK" => Some(0x91),
        "PAUSE" => Some(0x13),
        "PRINTSCREEN" => Some(0x2C),

        // Punctuation / OEM keys
        "MINUS" => Some(0xBD),
        "PLUS" | "EQUALS" => Some(0xBB),
        "COMMA" => Some(0xBC),
        "PERIOD" | "DOT" => Some(0xBE),
        "SLASH" => Some(0xBF),
        "SEMICOLON" => Some(0xBA),
        "BACKSLASH" => Some(0xDC),
        "LBRACKET" => Some(0xDB),
        "RBRACKET" => Some(0xDD),
        "QUOTE" => Some(0xDE),
        "BACKTICK" | "GRAVE" => Some(0xC0),

        _ => None,
    }
}

/// Whether a virtual key sits on the extended part of the keyboard.
///
/// Such keys need the extended flag to be told apart from their numpad
/// twins (e.g. the arrow keys versus numpad 4/8/6/2).
pub fn is_extended_key(vk: u16) -> bool {
    // PageUp through the arrows, PrintScreen/Insert/Delete, Windows and
    // Apps keys, NumLock, right Ctrl, right Alt.
    matches!(vk, 0x21..=0x28 | 0x2C..=0x2E | 0x5B..=0x5D | 0x90 | 0xA3 | 0xA5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_case_insensitive() {
        // Assert
        assert_eq!(vk_from_name("j"), Some(0x4A));
        assert_eq!(vk_from_name("J"), Some(0x4A));
        assert_eq!(vk_from_name("a"), Some(0x41));
        assert_eq!(vk_from_name("Z"), Some(0x5A));
    }

    #[test]
    fn digits_return_vk_codes() {
        // Assert
        assert_eq!(vk_from_name("0"), Some(0x30));
        assert_eq!(vk_from_name("9"), Some(0x39));
    }

    #[test]
    fn named_keys() {
        // Assert
        assert_eq!(vk_from_name("Enter"), Some(0x0D));
        assert_eq!(vk_from_name("SPACE"), Some(0x20));
        assert_eq!(vk_from_name("esc"), Some(0x1B));
        assert_eq!(vk_from_name("ctrl"), Some(0x11));
        assert_eq!(vk_from_name("RWin"), Some(0x5C));
    }

    #[test]
    fn function_keys() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f12"), Some(0x7B));
        assert_eq!(vk_from_name("F24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
    }

    #[test]
    fn raw_hex_codes() {
        // Assert
        assert_eq!(vk_from_name("0x41"), Some(0x41));
        assert_eq!(vk_from_name("0XAD"), Some(0xAD));
        assert_eq!(vk_from_name("0x00"), None);
        assert_eq!(vk_from_name("0x1FF"), None);
    }

    #[test]
    fn unknown_returns_none() {
        // Assert
        assert_eq!(vk_from_name("INVALID"), None);
        assert_eq!(vk_from_name(""), None);
    }

    #[test]
    fn navigation_keys_are_extended() {
        // Assert
        assert!(is_extended_key(vk_from_name("left").unwrap()));
        assert!(is_extended_key(vk_from_name("delete").unwrap()));
        assert!(is_extended_key(vk_from_name("rctrl").unwrap()));
        assert!(!is_extended_key(vk_from_name("a").unwrap()));
        assert!(!is_extended_key(vk_from_name("lctrl").unwrap()));
        assert!(!is_extended_key(vk_from_name("enter").unwrap()));
    }
}
