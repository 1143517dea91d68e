// Image directory store.
// Creates the directory, writes and reads image files, and wipes it on sweep.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;

/// Result of wiping the image directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WipeReport {
    /// Files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Entries that could not be deleted.
    pub failed: Vec<PathBuf>,
}

/// Create the image directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Write image bytes to `path`.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let written = fs::File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(e) = written {
        // Leave nothing half-written behind.
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Read image bytes back from disk.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Delete every entry of `dir`. Failures are logged and skipped.
pub fn wipe_dir(dir: &Path) -> Result<WipeReport> {
    let mut report = WipeReport::default();

    for entry in fs::read_dir(dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to read directory entry");
                continue;
            }
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Removed image");
                report.removed.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete file");
                report.failed.push(path);
            }
        }
    }

    Ok(report)
}
