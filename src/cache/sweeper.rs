// Periodic image directory sweep.
// Counts invocations and wipes the whole directory on every 11th call.

use std::path::Path;

use tracing::{info, warn};

use super::store::{self, WipeReport};

/// Highest counter value; the next invocation resets it and wipes the directory,
/// so a wipe happens on every 11th call.
pub const SWEEP_THRESHOLD: u32 = 10;

/// What a single sweeper invocation decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDecision {
    /// Counter was incremented to the contained value.
    Count(u32),
    /// Counter was reset to zero; the directory must be wiped.
    Wipe,
}

/// What a single sweeper invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    Counted(u32),
    /// Directory wiped. `None` if the directory could not be listed.
    Wiped(Option<WipeReport>),
}

/// Invocation counter driving the full-directory wipe.
#[derive(Debug, Clone, Default)]
pub struct CacheSweeper {
    index: u32,
}

impl CacheSweeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter value.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Advance the counter without touching the filesystem.
    pub fn tick(&mut self) -> SweepDecision {
        if self.index >= SWEEP_THRESHOLD {
            self.index = 0;
            SweepDecision::Wipe
        } else {
            self.index += 1;
            SweepDecision::Count(self.index)
        }
    }

    /// Advance the counter and wipe `dir` when due.
    pub fn sweep(&mut self, dir: &Path) -> SweepOutcome {
        info!(index = self.index, "Cache index: {}", self.index);

        match self.tick() {
            SweepDecision::Count(index) => SweepOutcome::Counted(index),
            SweepDecision::Wipe => match store::wipe_dir(dir) {
                Ok(report) => {
                    info!(
                        removed = report.removed.len(),
                        failed = report.failed.len(),
                        "Image directory swept"
                    );
                    SweepOutcome::Wiped(Some(report))
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Cannot list image directory");
                    SweepOutcome::Wiped(None)
                }
            },
        }
    }
}
