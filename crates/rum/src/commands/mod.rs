pub mod init;

#[cfg(windows)]
pub mod clipboard;
#[cfg(windows)]
pub mod dialog;
pub mod keys;
#[cfg(windows)]
pub mod metrics;
#[cfg(windows)]
pub mod session;
#[cfg(windows)]
pub mod windows;
