//! Platform-agnostic core of the Rum automation bridge.
//!
//! Platform crates implement the traits in [`window`], [`input`],
//! [`dialog`], [`metrics`] and [`clipboard`]; this crate supplies the
//! blocking-call bridge, the clipboard watcher state machine and the
//! [`Automation`] facade the host talks to.

pub mod automation;
pub mod bridge;
pub mod clipboard;
pub mod config;
pub mod dialog;
pub mod error;
pub mod input;
pub mod log;
pub mod metrics;
pub mod rect;
pub mod window;
pub mod worker;

pub use automation::{Automation, Platform};
pub use bridge::{HostLock, NoHostLock, run_blocking};
pub use clipboard::{ClipboardChange, ClipboardSource, ClipboardWatcher, ReinstallPolicy};
pub use config::Config;
pub use dialog::{DialogHost, DialogOutcome, DialogRequest, DialogResponse};
pub use error::{Error, Result};
pub use input::{InputSink, KeyEvent};
pub use metrics::{DesktopMetrics, MetricsReader};
pub use rect::Rect;
pub use window::{ProcessModuleInfo, WindowHandle, WindowSystem};
pub use worker::{BlockingWorker, Pending};
