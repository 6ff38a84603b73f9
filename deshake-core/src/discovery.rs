// ============================================================================
// deshake-core/src/discovery.rs
// ============================================================================
//
// DISCOVERY: Input File Enumeration
//
// Lists the files eligible for stabilization in the top level of the input
// directory. By default only recognized video extensions are returned;
// `include_all` lifts the filter and returns every regular file, for
// directories known to contain nothing but videos.
//
// Results are sorted by name so a batch visits equal-sized files in a
// stable order. Size-based ordering happens later, in the batch runner.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// File extensions treated as video input (matched case-insensitively).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "m4v", "mpg", "mpeg", "wmv", "flv", "3gp",
];

/// Whether the path carries one of the recognized video extensions.
#[must_use]
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Finds files to process in the top level of `input_dir` (no recursion).
///
/// Returns `CoreError::NoFilesFound` when the directory contains nothing
/// matching; directory read failures propagate as `CoreError::Io`.
pub fn find_processable_files(input_dir: &Path, include_all: bool) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && (include_all || has_video_extension(path)))
        .collect();

    files.sort();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
