// ============================================================================
// deshake-core/src/utils.rs
// ============================================================================
//
// UTILITIES: Formatting and Path Helpers
//
// Small shared helpers: human-readable durations and byte counts for the
// run summary, and safe extraction of filename components from paths.

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Formats a duration in seconds as `HH:MM:SS`.
///
/// Non-finite or negative inputs render as `??:??:??`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds.round() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats a byte count with a binary unit suffix (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.2} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Extracts the filename from a path as a `String`.
///
/// Fails with `PathError` when the path has no filename component or the
/// name is not valid UTF-8.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
        .ok_or_else(|| {
            CoreError::PathError(format!("Could not get filename from path: {}", path.display()))
        })
}

/// Extracts the file stem (filename with its last extension stripped)
/// from a path as a `String`.
pub fn get_file_stem_safe(path: &Path) -> CoreResult<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
        .ok_or_else(|| {
            CoreError::PathError(format!(
                "Could not get file stem from path: {}",
                path.display()
            ))
        })
}
