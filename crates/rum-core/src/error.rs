use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for Rum operations.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the automation bridge.
///
/// Most operations never surface an error: OS failures degrade to a
/// sentinel value (`false`, an empty string, a zero rectangle). This
/// type covers the few conditions a caller must act on.
#[derive(Debug, Error)]
pub enum Error {
    /// One-time process setup failed; nothing else can work.
    #[error("initialization failed: {0}")]
    Init(String),

    /// `evaluate` was called before `install`.
    #[error("clipboard watcher is not installed")]
    WatcherNotInstalled,

    /// `install` was called twice with the `reject` re-install policy.
    #[error("clipboard watcher is already installed")]
    WatcherAlreadyInstalled,

    /// The blocking worker exited or dropped the job before replying.
    #[error("blocking worker is gone")]
    WorkerGone,

    /// Offloading was requested but `bridge.offload` is disabled.
    #[error("offload worker is disabled in the configuration")]
    OffloadDisabled,

    /// Configuration could not be located, read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O failure while performing a system operation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An OS call failed where the failure must be reported.
    #[error("OS error: {0}")]
    Os(String),
}
