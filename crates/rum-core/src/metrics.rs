use serde::Serialize;

use crate::Rect;

/// Desktop and screen metrics.
///
/// Pure queries. On a working OS none of these can fail; if one does
/// the platform returns zero.
pub trait MetricsReader {
    /// Width of the primary screen in pixels.
    fn screen_width(&self) -> i32;

    /// Height of the primary screen in pixels.
    fn screen_height(&self) -> i32;

    /// The primary desktop area not covered by the taskbar or docked
    /// toolbars.
    fn desktop_work_area(&self) -> Rect;
}

/// A snapshot of every metric, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DesktopMetrics {
    pub screen_width: i32,
    pub screen_height: i32,
    pub work_area: Rect,
}

impl DesktopMetrics {
    pub fn read(reader: &impl MetricsReader) -> Self {
        Self {
            screen_width: reader.screen_width(),
            screen_height: reader.screen_height(),
            work_area: reader.desktop_work_area(),
        }
    }
}
