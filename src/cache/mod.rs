// Image cache module.
// Local directory holding downloaded images until the periodic sweep removes them.

pub mod paths;
pub mod store;
pub mod sweeper;

pub use paths::*;
pub use store::{WipeReport, ensure_dir, read_image, wipe_dir, write_image};
pub use sweeper::{CacheSweeper, SWEEP_THRESHOLD, SweepDecision, SweepOutcome};
