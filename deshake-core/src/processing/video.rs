// ============================================================================
// deshake-core/src/processing/video.rs
// ============================================================================
//
// VIDEO PROCESSING: The Batch Runner
//
// Drives the whole pipeline for a batch of input files: order them by
// size (smallest first), then for each one run the stabilizer, reassemble
// the emitted frames with ffmpeg, and clear the frames directory for the
// next item.
//
// External tool failures are logged and never stop the batch; the run
// moves on to the next stage and then the next file, recording a result
// for every item. Filesystem failures do abort, since they mean the
// pipeline's own ground (output directory, frames directory, input
// metadata) is broken.

// ---- External crate imports ----
use colored::Colorize;
use log::{debug, error, info, warn};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::time::Instant;

// ---- Internal crate imports ----
use crate::StabResult;
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::ffmpeg::{AssembleParams, run_frame_assembly};
use crate::external::{FfmpegSpawner, FileMetadataProvider, StabilizerRunner, check_dependency};
use crate::frames;
use crate::utils::{format_duration, get_file_stem_safe, get_filename_safe};

/// One input file and its derived output path.
///
/// Work items have no persisted identity; a fresh list is planned for
/// every batch.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Derives the output path for an input file:
/// `<output_dir>/<stem><suffix>.<ext>`.
///
/// Only the last extension is stripped, so `take.2.mov` becomes
/// `take.2<suffix>.<ext>`. An existing file at the derived path is
/// silently overwritten when the encoder runs.
pub fn derive_output_path(input_path: &Path, config: &CoreConfig) -> CoreResult<PathBuf> {
    let stem = get_file_stem_safe(input_path)?;
    let filename = format!("{stem}{}.{}", config.output_suffix, config.output_ext);
    Ok(config.output_dir.join(filename))
}

/// Sorts files ascending by size, so short clips finish first.
///
/// The sort is stable: files of equal size keep their incoming order.
/// Unreadable metadata is a hard error, since ordering is part of the
/// runner's contract.
pub fn sort_files_by_size<M: FileMetadataProvider>(
    metadata_provider: &M,
    files: &[PathBuf],
) -> CoreResult<Vec<PathBuf>> {
    let mut sized: Vec<(u64, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let size = metadata_provider.get_size(file)?;
        sized.push((size, file.clone()));
    }
    sized.sort_by_key(|(size, _)| *size);
    Ok(sized.into_iter().map(|(_, path)| path).collect())
}

/// Builds the ordered work list for a batch: inputs sorted by size
/// ascending, each paired with its derived output path.
pub fn plan_work_items<M: FileMetadataProvider>(
    metadata_provider: &M,
    config: &CoreConfig,
    files: &[PathBuf],
) -> CoreResult<Vec<WorkItem>> {
    let sorted = sort_files_by_size(metadata_provider, files)?;
    let mut items = Vec::with_capacity(sorted.len());
    for input_path in sorted {
        let output_path = derive_output_path(&input_path, config)?;
        items.push(WorkItem {
            input_path,
            output_path,
        });
    }
    Ok(items)
}

/// Processes a batch of video files through stabilize, assemble, and
/// frame cleanup, strictly one file at a time.
///
/// Returns a `StabResult` for every item, including items whose external
/// stages failed. Only filesystem errors make this function return `Err`.
pub fn process_videos<S, E, M>(
    stabilizer: &S,
    spawner: &E,
    metadata_provider: &M,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
) -> CoreResult<Vec<StabResult>>
where
    S: StabilizerRunner,
    E: FfmpegSpawner,
    M: FileMetadataProvider,
{
    // ==== STEP 1: Check external dependencies ====
    // A missing tool is only a warning. Tool failures never stop the
    // batch; they just produce failed items.
    match check_dependency("ffmpeg", "-version") {
        Ok(()) => info!("  {} {}", "[OK]".green().bold(), "ffmpeg found."),
        Err(e) => warn!("  {e}. Frame assembly may fail."),
    }
    match check_dependency(&config.stabilizer_bin, "--help") {
        Ok(()) => info!(
            "  {} {} found.",
            "[OK]".green().bold(),
            config.stabilizer_bin
        ),
        Err(e) => warn!("  {e}. Stabilization may fail."),
    }

    // ==== STEP 2: Order the batch ====
    let work_items = plan_work_items(metadata_provider, config, files_to_process)?;
    debug!("Processing {} file(s)", work_items.len());

    let frames_dir = config.frames_dir();
    let mut results: Vec<StabResult> = Vec::with_capacity(work_items.len());

    // ==== STEP 3: Process each item ====
    for item in &work_items {
        let item_start = Instant::now();
        let filename = get_filename_safe(&item.input_path)?;
        let input_size = metadata_provider.get_size(&item.input_path)?;

        // Recreated every iteration; both calls are idempotent.
        std::fs::create_dir_all(&config.output_dir)?;
        frames::ensure_frames_dir(&frames_dir)?;

        // The banner prints unconditionally, before any stage can fail.
        info!("{}", "-".repeat(74));
        info!("{}", "Stabilizing video:".cyan().bold());
        info!("    in: {}", item.input_path.display().to_string().yellow());
        info!("   out: {}", item.output_path.display());
        info!("{}", "-".repeat(74));

        // -- Stage 1: stabilize into the frames directory --
        match stabilizer.run(config, &item.input_path) {
            Ok(status) if status.success() => {
                debug!("Stabilizer finished for {filename}");
            }
            Ok(status) => {
                warn!("Stabilizer exited with {status} for {filename}; continuing to frame assembly.");
            }
            Err(e) => {
                error!("Stabilizer failed to run for {filename}: {e}");
            }
        }

        let frame_count = frames::count_frames(&frames_dir)?;
        if frame_count == 0 {
            // Assembly still runs. The frames directory is shared and only
            // cleared after encoding, so whatever is present at this point
            // is what the encoder reads.
            warn!(
                "No frames found in {} after stabilization.",
                frames_dir.display()
            );
        } else {
            debug!("Stabilizer produced {frame_count} frame(s)");
        }

        // -- Stage 2: assemble frames into the output video --
        let params = AssembleParams {
            frames_pattern: config.frame_pattern_path(),
            output_path: item.output_path.clone(),
            frame_rate: config.frame_rate,
            threads: config.encoder_threads,
        };
        match run_frame_assembly(spawner, &params) {
            Ok(()) => {
                info!(
                    "{} {}",
                    "Assembled:".green().bold(),
                    item.output_path.display()
                );
            }
            Err(e) => {
                error!("Frame assembly failed for {filename}: {e}");
            }
        }

        // -- Stage 3: clear the frames directory for the next item --
        let removed = frames::clear_frames(&frames_dir)?;
        debug!("Removed {removed} entries from {}", frames_dir.display());

        // Missing output (after a failed assembly) reads as size 0 in the
        // summary rather than killing the batch.
        let output_size = metadata_provider.get_size(&item.output_path).unwrap_or(0);

        let duration = item_start.elapsed();
        info!(
            "{} {} in {}",
            "Completed:".cyan().bold(),
            filename,
            format_duration(duration.as_secs_f64())
        );
        info!("----------------------------------------");

        results.push(StabResult {
            filename,
            duration,
            input_size,
            output_size,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::collections::HashMap;

    struct FixedSizes(HashMap<PathBuf, u64>);

    impl FixedSizes {
        fn new(entries: &[(&str, u64)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(path, size)| (PathBuf::from(path), *size))
                    .collect(),
            )
        }
    }

    impl FileMetadataProvider for FixedSizes {
        fn get_size(&self, path: &Path) -> CoreResult<u64> {
            self.0.get(path).copied().ok_or_else(|| {
                CoreError::PathError(format!("no size recorded for {}", path.display()))
            })
        }
    }

    fn test_config() -> CoreConfig {
        CoreConfig::new(
            PathBuf::from("/in"),
            PathBuf::from("/out"),
            PathBuf::from("/work"),
        )
    }

    #[test]
    fn test_derive_output_path_renames_all_components() {
        let config = test_config();
        let derived = derive_output_path(Path::new("/in/clip.mp4"), &config).unwrap();
        assert_eq!(derived, PathBuf::from("/out/clip-real-stab.avi"));
    }

    #[test]
    fn test_derive_output_path_strips_last_extension_only() {
        let config = test_config();
        let derived = derive_output_path(Path::new("/in/take.2.mov"), &config).unwrap();
        assert_eq!(derived, PathBuf::from("/out/take.2-real-stab.avi"));
    }

    #[test]
    fn test_derive_output_path_handles_missing_extension() {
        let config = test_config();
        let derived = derive_output_path(Path::new("/in/raw"), &config).unwrap();
        assert_eq!(derived, PathBuf::from("/out/raw-real-stab.avi"));
    }

    #[test]
    fn test_derive_output_path_honors_custom_suffix_and_ext() {
        let mut config = test_config();
        config.output_suffix = "-smooth".to_string();
        config.output_ext = "mkv".to_string();
        let derived = derive_output_path(Path::new("/in/clip.mp4"), &config).unwrap();
        assert_eq!(derived, PathBuf::from("/out/clip-smooth.mkv"));
    }

    #[test]
    fn test_sort_is_ascending_by_size() {
        let provider = FixedSizes::new(&[("/in/a.mp4", 500), ("/in/b.mp4", 200), ("/in/c.mp4", 900)]);
        let files = vec![
            PathBuf::from("/in/a.mp4"),
            PathBuf::from("/in/b.mp4"),
            PathBuf::from("/in/c.mp4"),
        ];

        let sorted = sort_files_by_size(&provider, &files).unwrap();
        assert_eq!(
            sorted,
            vec![
                PathBuf::from("/in/b.mp4"),
                PathBuf::from("/in/a.mp4"),
                PathBuf::from("/in/c.mp4"),
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_sizes() {
        let provider = FixedSizes::new(&[("/in/a.mp4", 500), ("/in/b.mp4", 200), ("/in/c.mp4", 200)]);
        let files = vec![
            PathBuf::from("/in/a.mp4"),
            PathBuf::from("/in/b.mp4"),
            PathBuf::from("/in/c.mp4"),
        ];

        let sorted = sort_files_by_size(&provider, &files).unwrap();
        // b and c tie at 200 bytes and keep their incoming order.
        assert_eq!(
            sorted,
            vec![
                PathBuf::from("/in/b.mp4"),
                PathBuf::from("/in/c.mp4"),
                PathBuf::from("/in/a.mp4"),
            ]
        );
    }

    #[test]
    fn test_sort_propagates_metadata_errors() {
        let provider = FixedSizes::new(&[("/in/a.mp4", 500)]);
        let files = vec![PathBuf::from("/in/a.mp4"), PathBuf::from("/in/gone.mp4")];
        assert!(sort_files_by_size(&provider, &files).is_err());
    }

    #[test]
    fn test_plan_orders_and_derives() {
        let provider = FixedSizes::new(&[("/in/a.mp4", 500 * 1024), ("/in/b.mp4", 200 * 1024)]);
        let config = test_config();
        let files = vec![PathBuf::from("/in/a.mp4"), PathBuf::from("/in/b.mp4")];

        let items = plan_work_items(&provider, &config, &files).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].input_path, PathBuf::from("/in/b.mp4"));
        assert_eq!(items[0].output_path, PathBuf::from("/out/b-real-stab.avi"));
        assert_eq!(items[1].input_path, PathBuf::from("/in/a.mp4"));
        assert_eq!(items[1].output_path, PathBuf::from("/out/a-real-stab.avi"));
    }
}
