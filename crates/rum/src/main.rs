mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rum",
    version,
    about = "Native Windows automation from the command line"
)]
struct Cli {
    /// Override the configured log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    #[command(flatten)]
    Desktop(DesktopCommands),
}

/// Commands that need an initialized automation session.
#[derive(Subcommand)]
enum DesktopCommands {
    /// List every top-level window
    Windows {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Bring a window to the foreground
    Show {
        /// Window handle, hex (0x1A2B) or decimal
        window: String,
    },
    /// Inject a single key press or release
    SendKey(commands::keys::SendKeyArgs),
    /// Press and release a key
    TypeKey {
        /// Key name (a, f5, enter, ctrl) or virtual-key code (0x41)
        key: String,
    },
    /// Show an OK/Cancel dialog
    Confirm {
        text: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// Ask the user for a line of text
    Prompt {
        text: String,
        #[arg(long)]
        title: Option<String>,
        /// Maximum length in UTF-16 units; 0 uses the configured default
        #[arg(long, default_value_t = 0)]
        max_chars: usize,
    },
    /// Show screen size and work area
    Metrics {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the console window handle of this process
    Console,
    /// Report clipboard changes until Ctrl+C
    WatchClipboard {
        /// Polling interval in milliseconds
        #[arg(long, default_value_t = 250)]
        interval_ms: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Desktop(command) => run(command, cli.log_level.as_deref()),
    }
}

#[cfg(windows)]
fn run(command: DesktopCommands, log_level: Option<&str>) {
    let automation = commands::session::open(log_level);

    match command {
        DesktopCommands::Windows { json } => commands::windows::execute(&automation, json),
        DesktopCommands::Show { window } => commands::windows::show(&automation, &window),
        DesktopCommands::SendKey(args) => commands::keys::send(&automation, &args),
        DesktopCommands::TypeKey { key } => commands::keys::tap(&automation, &key),
        DesktopCommands::Confirm { text, title } => {
            commands::dialog::confirm(&automation, &text, title.as_deref())
        }
        DesktopCommands::Prompt {
            text,
            title,
            max_chars,
        } => commands::dialog::prompt(&automation, &text, title.as_deref(), max_chars),
        DesktopCommands::Metrics { json } => commands::metrics::execute(&automation, json),
        DesktopCommands::Console => commands::windows::console(&automation),
        DesktopCommands::WatchClipboard { interval_ms } => {
            commands::clipboard::watch(&automation, interval_ms)
        }
    }
}

#[cfg(not(windows))]
fn run(_command: DesktopCommands, _log_level: Option<&str>) {
    eprintln!("Error: rum only supports Windows.");
    std::process::exit(1);
}
