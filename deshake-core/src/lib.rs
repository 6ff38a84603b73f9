// ============================================================================
// deshake-core/src/lib.rs
// ============================================================================
//
// DESHAKE CORE LIBRARY: Main Entry Point and Public API
//
// Library crate for batch video stabilization. The pipeline shells out to
// two external tools per input file: a stabilizer that turns a shaky
// video into a directory of corrected frames, and ffmpeg, which
// reassembles those frames into the output video.
//
// ARCHITECTURE:
// - config:     explicit pipeline configuration (CoreConfig)
// - discovery:  input file enumeration
// - processing: work-item planning and the batch runner
// - external:   subprocess boundary (stabilizer, ffmpeg, probes, mocks)
// - frames:     frame working directory management
// - error:      CoreError / CoreResult
// - utils:      formatting and path helpers

//! Batch video stabilization via an external stabilizer and ffmpeg.
//!
//! Inputs are processed strictly one at a time, smallest file first. For
//! each file the stabilizer writes frames into a shared working
//! directory, ffmpeg reassembles them into `<stem><suffix>.<ext>` in the
//! output directory, and the frames are cleared for the next file.
//! External tool failures are logged and skipped past; filesystem
//! failures abort the batch.
//!
//! # Example
//!
//! ```no_run
//! use deshake_core::external::{CommandStabilizer, SidecarSpawner, StdFsMetadataProvider};
//! use deshake_core::{CoreConfig, find_processable_files, process_videos};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CoreConfig::new(
//!         PathBuf::from("/videos/shaky"),
//!         PathBuf::from("/videos/stable"),
//!         PathBuf::from("."),
//!     );
//!     config.validate()?;
//!
//!     let files = find_processable_files(&config.input_dir, false)?;
//!     let results = process_videos(
//!         &CommandStabilizer,
//!         &SidecarSpawner,
//!         &StdFsMetadataProvider,
//!         &config,
//!         &files,
//!     )?;
//!
//!     for result in &results {
//!         println!("{}: {} bytes written", result.filename, result.output_size);
//!     }
//!     Ok(())
//! }
//! ```

// ---- Module declarations ----
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod frames;
pub mod processing;
pub mod utils;

// ---- Public re-exports ----
pub use config::CoreConfig;
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use processing::{
    WorkItem, derive_output_path, plan_work_items, process_videos, sort_files_by_size,
};
pub use utils::{format_bytes, format_duration};

/// Outcome of one processed work item, for reporting.
///
/// Recorded for every item, including those whose external stages failed;
/// `output_size` is `0` when no output file exists.
#[derive(Debug, Clone)]
pub struct StabResult {
    /// Input filename (no directory).
    pub filename: String,
    /// Wall-clock time spent on this item.
    pub duration: std::time::Duration,
    /// Input file size in bytes.
    pub input_size: u64,
    /// Output file size in bytes, or 0 if the output was not produced.
    pub output_size: u64,
}
