use serde::Serialize;

/// A rectangle in screen coordinates, as reported by the OS.
///
/// The edges are stored exactly as Win32 `RECT` carries them: `right`
/// and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Sentinel returned when a rectangle query fails.
    pub const ZERO: Self = Self {
        top: 0,
        left: 0,
        right: 0,
        bottom: 0,
    };

    pub fn new(top: i32, left: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns whether this is the zero sentinel.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
