// ============================================================================
// deshake-core/src/frames.rs
// ============================================================================
//
// FRAMES: Frame Working Directory Management
//
// The stabilizer writes its output frames into a single shared directory
// that every work item reuses. These helpers create it, count what the
// stabilizer produced, and clear it between items. Clearing removes the
// directory's contents but keeps the directory itself, and treats a
// missing directory as already clear.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::CoreResult;

/// Creates the frames directory (and parents) if it does not exist.
pub fn ensure_frames_dir(frames_dir: &Path) -> CoreResult<()> {
    std::fs::create_dir_all(frames_dir)?;
    Ok(())
}

/// Removes every entry inside the frames directory, keeping the directory.
///
/// Returns the number of entries removed. A missing directory is treated
/// as already clear; any other filesystem failure propagates.
pub fn clear_frames(frames_dir: &Path) -> CoreResult<usize> {
    let entries = match std::fs::read_dir(frames_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err.into()),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
        removed += 1;
    }

    Ok(removed)
}

/// Counts the regular files currently in the frames directory.
///
/// A missing directory counts as zero frames.
pub fn count_frames(frames_dir: &Path) -> CoreResult<usize> {
    let entries = match std::fs::read_dir(frames_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err.into()),
    };

    let mut count = 0;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            count += 1;
        }
    }

    Ok(count)
}
