use rum_core::{Automation, DialogOutcome};
use rum_windows::Win32Platform;

fn title_or_default<'a>(
    automation: &'a Automation<Win32Platform>,
    title: Option<&'a str>,
) -> &'a str {
    title.unwrap_or(&automation.config().dialog.prompt_title)
}

/// Shows an OK/Cancel box; exits 0 on OK and 1 otherwise.
pub fn confirm(automation: &Automation<Win32Platform>, text: &str, title: Option<&str>) {
    if automation.confirm(text, title_or_default(automation, title)) {
        println!("ok");
    } else {
        println!("cancel");
        std::process::exit(1);
    }
}

/// Prints the entered text on OK; exits 1 on Cancel and 2 on failure.
pub fn prompt(
    automation: &Automation<Win32Platform>,
    text: &str,
    title: Option<&str>,
    max_chars: usize,
) {
    let response = automation.prompt_text(text, title_or_default(automation, title), max_chars);
    match response.outcome() {
        DialogOutcome::Ok => println!("{}", response.text),
        DialogOutcome::Cancel => std::process::exit(1),
        DialogOutcome::Dismissed => {
            eprintln!("Error: the prompt could not be shown.");
            std::process::exit(2);
        }
    }
}
