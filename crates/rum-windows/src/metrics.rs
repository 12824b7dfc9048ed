use std::ffi::c_void;

use rum_core::Rect;
use tracing::debug;
use windows::Win32::Foundation::RECT;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN, SPI_GETWORKAREA,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
};

/// Width of the primary screen in pixels.
pub fn screen_width() -> i32 {
    // SAFETY: GetSystemMetrics is a pure query.
    unsafe { GetSystemMetrics(SM_CXSCREEN) }
}

/// Height of the primary screen in pixels.
pub fn screen_height() -> i32 {
    // SAFETY: GetSystemMetrics is a pure query.
    unsafe { GetSystemMetrics(SM_CYSCREEN) }
}

/// Returns the work area of the primary monitor.
///
/// The work area excludes the taskbar and any docked toolbars.
pub fn desktop_work_area() -> Rect {
    let mut area = RECT::default();

    // SAFETY: SPI_GETWORKAREA writes a RECT into pvParam, which points at
    // our local. No setting is changed.
    let result = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut area as *mut RECT as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };

    match result {
        Ok(()) => Rect::new(area.top, area.left, area.right, area.bottom),
        Err(e) => {
            debug!("SPI_GETWORKAREA failed: {e}");
            Rect::ZERO
        }
    }
}
