use rum_core::dialog::{DialogKind, DialogRequest, DialogResponse};
use tracing::debug;
use windows::Win32::Foundation::HINSTANCE;
use windows::Win32::UI::WindowsAndMessaging::{
    MB_OKCANCEL, MB_SETFOREGROUND, MB_TOPMOST, MessageBoxW,
};
use windows::core::HSTRING;

use crate::prompt;

/// Shows the requested dialog and blocks until it is closed.
pub fn present(request: &DialogRequest, instance: HINSTANCE) -> DialogResponse {
    match request.kind {
        DialogKind::Confirmation => message_box(&request.text, &request.title),
        DialogKind::TextInput { max_chars } => {
            prompt::show(instance, &request.text, &request.title, max_chars)
        }
    }
}

/// OK/Cancel message box, topmost and claiming the foreground.
///
/// The status is the raw `MessageBoxW` result: `IDOK`, `IDCANCEL`, or
/// `0` when the box could not be created.
fn message_box(text: &str, title: &str) -> DialogResponse {
    // SAFETY: MessageBoxW copies both strings before returning; the
    // HSTRINGs live until then. A null owner makes the box unowned.
    let result = unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(text),
            &HSTRING::from(title),
            MB_OKCANCEL | MB_TOPMOST | MB_SETFOREGROUND,
        )
    };
    debug!("MessageBoxW returned {}", result.0);
    DialogResponse::new(result.0, String::new())
}
