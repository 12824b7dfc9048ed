/// Dialog return code for the OK button (`IDOK`).
pub const STATUS_OK: i32 = 1;

/// Dialog return code for the Cancel button or the close box (`IDCANCEL`).
pub const STATUS_CANCEL: i32 = 2;

/// Dialog return code when the dialog could not be shown.
pub const STATUS_FAILED: i32 = 0;

/// What kind of dialog to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// OK/Cancel question.
    Confirmation,
    /// Single-line text entry holding at most `max_chars` UTF-16 units.
    TextInput { max_chars: usize },
}

/// A request to show a blocking modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub text: String,
    pub title: String,
    pub kind: DialogKind,
}

impl DialogRequest {
    pub fn confirmation(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            kind: DialogKind::Confirmation,
        }
    }

    pub fn text_input(text: impl Into<String>, title: impl Into<String>, max_chars: usize) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            kind: DialogKind::TextInput { max_chars },
        }
    }
}

/// How the user left the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Ok,
    Cancel,
    /// The dialog failed to show or returned an unexpected code.
    Dismissed,
}

impl DialogOutcome {
    pub fn from_status(status: i32) -> Self {
        match status {
            STATUS_OK => Self::Ok,
            STATUS_CANCEL => Self::Cancel,
            _ => Self::Dismissed,
        }
    }
}

/// The raw reply of a dialog: the OS status code and any entered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogResponse {
    pub status: i32,
    /// Entered text; always empty for confirmations.
    pub text: String,
}

impl DialogResponse {
    pub fn new(status: i32, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// Sentinel for a dialog that could not be shown.
    pub fn failed() -> Self {
        Self::new(STATUS_FAILED, String::new())
    }

    pub fn outcome(&self) -> DialogOutcome {
        DialogOutcome::from_status(self.status)
    }
}

/// Presents modal dialogs. Calls block until the user answers.
pub trait DialogHost {
    fn present(&self, request: &DialogRequest) -> DialogResponse;
}

/// Truncates `text` to at most `max_units` UTF-16 code units.
///
/// Windows measures edit-control capacity in UTF-16 units, not bytes or
/// chars. A surrogate pair that would straddle the limit is dropped whole.
pub fn truncate_utf16(text: &str, max_units: usize) -> String {
    let mut units = 0;
    let mut end = 0;
    for (index, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > max_units {
            return text[..end].to_string();
        }
        end = index + ch.len_utf8();
    }
    text.to_string()
}
