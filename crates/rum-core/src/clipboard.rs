//! Clipboard change detection.
//!
//! The watcher never waits for a clipboard event. The host calls
//! [`ClipboardWatcher::evaluate`] on its own schedule and the watcher
//! compares the OS clipboard sequence number with the last one it saw.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::{Error, Result};

/// What `install` does when the watcher is already installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReinstallPolicy {
    /// Re-read the sequence baseline. Changes not yet evaluated are dropped.
    #[default]
    Reset,
    /// Fail with [`Error::WatcherAlreadyInstalled`] and keep the old baseline.
    Reject,
}

/// Access to the OS clipboard as far as change detection needs it.
pub trait ClipboardSource {
    /// The OS clipboard sequence number.
    ///
    /// `0` means the sequence is unavailable (no clipboard access in this
    /// session) and is never treated as a change.
    fn sequence(&self) -> u32;

    /// Registers for change notifications.
    fn listen(&mut self) -> Result<()>;

    /// Removes the registration made by `listen`.
    fn unlisten(&mut self);

    /// Discards queued change notifications without blocking and returns
    /// how many there were.
    fn drain_notifications(&mut self) -> usize;

    /// The clipboard text, if the clipboard currently holds text.
    fn read_text(&self) -> Option<String>;
}

/// A detected clipboard change, passed to the evaluate callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardChange {
    /// Sequence number after the change.
    pub sequence: u32,
    /// New clipboard text, `None` for non-text content.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Uninstalled,
    Installed { last_observed_sequence: u32 },
}

/// Reports each clipboard change once.
pub struct ClipboardWatcher<S: ClipboardSource> {
    source: S,
    state: WatchState,
    policy: ReinstallPolicy,
}

impl<S: ClipboardSource> ClipboardWatcher<S> {
    /// Creates an uninstalled watcher.
    pub fn new(source: S, policy: ReinstallPolicy) -> Self {
        Self {
            source,
            state: WatchState::Uninstalled,
            policy,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.state, WatchState::Installed { .. })
    }

    /// The sequence number the next `evaluate` compares against.
    pub fn last_observed_sequence(&self) -> Option<u32> {
        match self.state {
            WatchState::Installed {
                last_observed_sequence,
            } => Some(last_observed_sequence),
            WatchState::Uninstalled => None,
        }
    }

    /// Starts watching, with the current sequence as the baseline.
    ///
    /// On an installed watcher the [`ReinstallPolicy`] decides between
    /// re-baselining and [`Error::WatcherAlreadyInstalled`].
    pub fn install(&mut self) -> Result<()> {
        match self.state {
            WatchState::Installed { .. } => match self.policy {
                ReinstallPolicy::Reject => return Err(Error::WatcherAlreadyInstalled),
                ReinstallPolicy::Reset => {
                    self.source.drain_notifications();
                }
            },
            WatchState::Uninstalled => self.source.listen()?,
        }

        let baseline = self.source.sequence();
        self.state = WatchState::Installed {
            last_observed_sequence: baseline,
        };
        info!("clipboard watcher installed at sequence {baseline}");
        Ok(())
    }

    /// Stops watching. Does nothing on an uninstalled watcher.
    pub fn uninstall(&mut self) {
        if self.is_installed() {
            self.source.unlisten();
            self.state = WatchState::Uninstalled;
            debug!("clipboard watcher uninstalled");
        }
    }

    /// Checks for a clipboard change without blocking.
    ///
    /// Calls `on_change` once and returns `Ok(true)` if the sequence moved
    /// forward since the last evaluation; returns `Ok(false)` otherwise.
    /// The stored sequence never decreases: a lower reading (a restarted
    /// window station) is ignored and the baseline kept. The new
    /// sequence is recorded before `on_change` runs, so a panicking
    /// callback cannot cause the same change to be reported twice.
    pub fn evaluate<F>(&mut self, on_change: F) -> Result<bool>
    where
        F: FnOnce(ClipboardChange),
    {
        let WatchState::Installed {
            last_observed_sequence,
        } = self.state
        else {
            return Err(Error::WatcherNotInstalled);
        };

        let notified = self.source.drain_notifications();
        let current = self.source.sequence();

        if current == 0 || current == last_observed_sequence {
            if notified > 0 {
                trace!("{notified} clipboard notification(s) without sequence change");
            }
            return Ok(false);
        }

        if current < last_observed_sequence {
            debug!("clipboard sequence went back {last_observed_sequence} -> {current}; ignored");
            return Ok(false);
        }

        self.state = WatchState::Installed {
            last_observed_sequence: current,
        };
        debug!("clipboard sequence {last_observed_sequence} -> {current}");

        on_change(ClipboardChange {
            sequence: current,
            text: self.source.read_text(),
        });
        Ok(true)
    }
}

impl<S: ClipboardSource> Drop for ClipboardWatcher<S> {
    fn drop(&mut self) {
        self.uninstall();
    }
}
