//! A minimal modal text-input window.
//!
//! Win32 has no stock input box, so this builds one from a label, a
//! single-line edit control and OK/Cancel buttons, and runs its own
//! message loop until the user answers.

use std::cell::{Cell, RefCell};
use std::sync::atomic::AtomicBool;

use rum_core::dialog::{DialogResponse, STATUS_CANCEL, STATUS_OK};
use tracing::{debug, warn};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    COLOR_BTNFACE, DEFAULT_GUI_FONT, GetStockObject, GetSysColorBrush,
};
use windows::Win32::UI::Input::KeyboardAndMouse::SetFocus;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GWLP_USERDATA,
    GetMessageW, GetSystemMetrics, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
    HMENU, IDC_ARROW, IDCANCEL, IDOK, IsDialogMessageW, LoadCursorW, MSG, PostQuitMessage,
    SM_CXSCREEN, SM_CYSCREEN, SW_SHOW, SendMessageW, SetForegroundWindow,
    SetWindowLongPtrW, ShowWindow, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE,
    WM_COMMAND, WM_SETFONT, WNDCLASSW, WS_CAPTION, WS_CHILD, WS_EX_CLIENTEDGE,
    WS_EX_DLGMODALFRAME, WS_EX_TOPMOST, WS_POPUP, WS_SYSMENU, WS_TABSTOP, WS_VISIBLE,
};
use windows::core::{HSTRING, PCWSTR, w};

use crate::platform::register_window_class;

const CLASS_NAME: PCWSTR = w!("RumPromptWindow");

const WIDTH: i32 = 380;
const HEIGHT: i32 = 160;

const ID_LABEL: i32 = 100;
const ID_EDIT: i32 = 101;

// Control styles and messages from CommCtrl/WinUser.
const ES_AUTOHSCROLL: u32 = 0x0080;
const BS_DEFPUSHBUTTON: u32 = 0x0001;
const EM_LIMITTEXT: u32 = 0x00C5;

/// State shared between `show` and the window procedure.
///
/// The window procedure only ever sees a shared reference, so all
/// mutation goes through cells.
struct PromptState {
    edit: Cell<HWND>,
    status: Cell<i32>,
    text: RefCell<String>,
    done: Cell<bool>,
}

/// Shows the prompt and blocks until OK, Cancel, Escape or the close box.
///
/// The edit control accepts at most `max_chars` UTF-16 units. Returns
/// `IDOK` with the entered text, `IDCANCEL` with an empty string, or a
/// failed response when the window cannot be created.
pub fn show(instance: HINSTANCE, text: &str, title: &str, max_chars: usize) -> DialogResponse {
    if !register_class(instance) {
        return DialogResponse::failed();
    }

    let state = PromptState {
        edit: Cell::new(HWND::default()),
        status: Cell::new(STATUS_CANCEL),
        text: RefCell::new(String::new()),
        done: Cell::new(false),
    };

    let Some(hwnd) = create_window(instance, title) else {
        return DialogResponse::failed();
    };

    // SAFETY: `state` outlives the window: the loop below only returns
    // after the window is destroyed, and the pointer is read by
    // prompt_proc as a shared reference.
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, &state as *const PromptState as isize);
    }

    if let Err(e) = create_controls(hwnd, instance, text, max_chars, &state) {
        warn!("prompt controls could not be created: {e}");
        // SAFETY: we created the window above and destroy it once.
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
        return DialogResponse::failed();
    }

    // SAFETY: plain window-state calls on windows we own.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
        let _ = SetFocus(Some(state.edit.get()));
    }

    run_modal_loop(hwnd, &state);

    let status = state.status.get();
    let entered = state.text.take();
    debug!("prompt closed with status {status}");
    DialogResponse::new(status, entered)
}

/// Pumps messages until the prompt finishes.
///
/// `IsDialogMessageW` gives the window dialog keyboard behaviour: Tab
/// moves focus, Enter presses OK and Escape presses Cancel. A `WM_QUIT`
/// arriving meanwhile closes the prompt and is re-posted for the outer
/// loop.
fn run_modal_loop(hwnd: HWND, state: &PromptState) {
    let mut msg = MSG::default();

    while !state.done.get() {
        // SAFETY: standard message loop on the thread that owns `hwnd`.
        let got = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if got.0 <= 0 {
            if got.0 == 0 {
                // SAFETY: re-posting the quit code to this thread's queue.
                unsafe { PostQuitMessage(msg.wParam.0 as i32) };
            }
            break;
        }

        // SAFETY: msg was filled by GetMessageW above.
        unsafe {
            if !IsDialogMessageW(hwnd, &msg).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    if !state.done.get() {
        state.done.set(true);
        // SAFETY: the window is still alive because nothing finished it.
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
    }
}

fn register_class(instance: HINSTANCE) -> bool {
    static REGISTERED: AtomicBool = AtomicBool::new(false);

    let wc = WNDCLASSW {
        lpfnWndProc: Some(prompt_proc),
        hInstance: instance,
        // SAFETY: loads a shared system cursor and brush.
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        hbrBackground: unsafe { GetSysColorBrush(COLOR_BTNFACE) },
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };
    register_window_class(&REGISTERED, &wc)
}

fn create_window(instance: HINSTANCE, title: &str) -> Option<HWND> {
    // SAFETY: GetSystemMetrics is a pure query; CreateWindowExW uses our
    // registered class and copies the title.
    unsafe {
        let x = (GetSystemMetrics(SM_CXSCREEN) - WIDTH) / 2;
        let y = (GetSystemMetrics(SM_CYSCREEN) - HEIGHT) / 2;

        match CreateWindowExW(
            WS_EX_DLGMODALFRAME | WS_EX_TOPMOST,
            CLASS_NAME,
            &HSTRING::from(title),
            WS_POPUP | WS_CAPTION | WS_SYSMENU,
            x,
            y,
            WIDTH,
            HEIGHT,
            None,
            None,
            Some(instance),
            None,
        ) {
            Ok(h) if !h.is_invalid() => Some(h),
            _ => {
                warn!("Failed to create RumPromptWindow");
                None
            }
        }
    }
}

fn create_controls(
    parent: HWND,
    instance: HINSTANCE,
    text: &str,
    max_chars: usize,
    state: &PromptState,
) -> windows::core::Result<()> {
    let label = child(
        parent,
        instance,
        w!("STATIC"),
        text,
        WINDOW_EX_STYLE(0),
        WINDOW_STYLE(0),
        (12, 10, WIDTH - 40, 36),
        ID_LABEL,
    )?;
    let edit = child(
        parent,
        instance,
        w!("EDIT"),
        "",
        WS_EX_CLIENTEDGE,
        WS_TABSTOP | WINDOW_STYLE(ES_AUTOHSCROLL),
        (12, 50, WIDTH - 40, 24),
        ID_EDIT,
    )?;
    let ok = child(
        parent,
        instance,
        w!("BUTTON"),
        "OK",
        WINDOW_EX_STYLE(0),
        WS_TABSTOP | WINDOW_STYLE(BS_DEFPUSHBUTTON),
        (WIDTH - 200, 86, 80, 26),
        IDOK.0,
    )?;
    let cancel = child(
        parent,
        instance,
        w!("BUTTON"),
        "Cancel",
        WINDOW_EX_STYLE(0),
        WS_TABSTOP,
        (WIDTH - 112, 86, 80, 26),
        IDCANCEL.0,
    )?;

    state.edit.set(edit);

    // SAFETY: messages sent to child windows we just created.
    unsafe {
        let font = GetStockObject(DEFAULT_GUI_FONT);
        for control in [label, edit, ok, cancel] {
            SendMessageW(
                control,
                WM_SETFONT,
                Some(WPARAM(font.0 as usize)),
                Some(LPARAM(1)),
            );
        }
        SendMessageW(edit, EM_LIMITTEXT, Some(WPARAM(max_chars)), None);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn child(
    parent: HWND,
    instance: HINSTANCE,
    class: PCWSTR,
    text: &str,
    ex_style: WINDOW_EX_STYLE,
    style: WINDOW_STYLE,
    (x, y, width, height): (i32, i32, i32, i32),
    id: i32,
) -> windows::core::Result<HWND> {
    // SAFETY: creates a child of a window we own; the control id travels
    // in the menu-handle slot as Win32 requires for child windows.
    unsafe {
        CreateWindowExW(
            ex_style,
            class,
            &HSTRING::from(text),
            WS_CHILD | WS_VISIBLE | style,
            x,
            y,
            width,
            height,
            Some(parent),
            Some(HMENU(id as isize as *mut _)),
            Some(instance),
            None,
        )
    }
}

fn read_edit_text(edit: HWND) -> String {
    // SAFETY: reads the text of an edit control we own into a buffer
    // sized from its reported length.
    unsafe {
        let length = GetWindowTextLengthW(edit);
        if length <= 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(edit, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}

/// Finishes the prompt with `status` and destroys its window.
fn finish(hwnd: HWND, state: &PromptState, status: i32) {
    if status == STATUS_OK {
        state.text.replace(read_edit_text(state.edit.get()));
    }
    state.status.set(status);
    state.done.set(true);
    // SAFETY: called from the window procedure of `hwnd`, once.
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}

/// WNDPROC for the prompt window.
///
/// Handles the OK/Cancel commands (also raised by Enter/Escape through
/// `IsDialogMessageW`) and the close box. Everything else goes to
/// `DefWindowProcW`.
unsafe extern "system" fn prompt_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    // SAFETY: GWLP_USERDATA is either 0 or the PromptState pointer set
    // by `show`, which outlives the window.
    let state = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const PromptState;

    if let Some(state) = unsafe { state.as_ref() }
        && !state.done.get()
    {
        match msg {
            WM_COMMAND => {
                let id = (wparam.0 & 0xFFFF) as i32;
                if id == IDOK.0 {
                    finish(hwnd, state, STATUS_OK);
                    return LRESULT(0);
                }
                if id == IDCANCEL.0 {
                    finish(hwnd, state, STATUS_CANCEL);
                    return LRESULT(0);
                }
            }
            WM_CLOSE => {
                finish(hwnd, state, STATUS_CANCEL);
                return LRESULT(0);
            }
            _ => {}
        }
    }

    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}
