// deshake-core/tests/discovery_tests.rs
//
// Tests for input file discovery: extension filtering, the include_all
// escape hatch, and the error cases.

use deshake_core::{CoreError, find_processable_files};
use std::fs::File;
use tempfile::tempdir;

#[test]
fn test_finds_recognized_video_extensions() -> Result<(), Box<dyn std::error::Error>> {
    // --- Setup ---
    let dir = tempdir()?;
    File::create(dir.path().join("clip.mp4"))?;
    File::create(dir.path().join("movie.MKV"))?; // case-insensitive match
    File::create(dir.path().join("notes.txt"))?;
    File::create(dir.path().join("archive.zip"))?;

    // --- Execute ---
    let files = find_processable_files(dir.path(), false)?;

    // --- Assert ---
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["clip.mp4", "movie.MKV"]);
    Ok(())
}

#[test]
fn test_include_all_lifts_the_filter() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("clip.mp4"))?;
    File::create(dir.path().join("notes.txt"))?;
    File::create(dir.path().join("no_extension"))?;

    let files = find_processable_files(dir.path(), true)?;

    assert_eq!(files.len(), 3);
    Ok(())
}

#[test]
fn test_ignores_subdirectories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("clip.mp4"))?;
    let nested = dir.path().join("nested.mp4"); // a directory, despite the name
    std::fs::create_dir(&nested)?;
    File::create(nested.join("inner.mp4"))?;

    let files = find_processable_files(dir.path(), false)?;
    assert_eq!(files.len(), 1);

    // Directories are skipped even when the filter is off.
    let all = find_processable_files(dir.path(), true)?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[test]
fn test_results_are_sorted_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("zeta.mp4"))?;
    File::create(dir.path().join("alpha.mp4"))?;
    File::create(dir.path().join("mid.mp4"))?;

    let files = find_processable_files(dir.path(), false)?;

    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["alpha.mp4", "mid.mp4", "zeta.mp4"]);
    Ok(())
}

#[test]
fn test_empty_directory_reports_no_files_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let result = find_processable_files(dir.path(), false);

    assert!(matches!(result, Err(CoreError::NoFilesFound)));
    Ok(())
}

#[test]
fn test_unrecognized_files_only_reports_no_files_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("notes.txt"))?;

    let result = find_processable_files(dir.path(), false);

    assert!(matches!(result, Err(CoreError::NoFilesFound)));
    Ok(())
}

#[test]
fn test_missing_directory_reports_io_error() {
    let result = find_processable_files(std::path::Path::new("/nonexistent/deshake-test"), false);
    assert!(matches!(result, Err(CoreError::Io(_))));
}
