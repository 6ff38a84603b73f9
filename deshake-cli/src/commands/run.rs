// ============================================================================
// deshake-cli/src/commands/run.rs
// ============================================================================
//
// RUN COMMAND: Full Batch Pipeline
//
// Resolves the input set, builds the core configuration from the parsed
// arguments, runs the batch with the real subprocess seams, and prints a
// per-file and total summary.

// ---- External crate imports ----
use colored::Colorize;
use log::{debug, info, warn};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::time::Instant;

// ---- Internal crate imports ----
use crate::cli::RunArgs;
use crate::error::{CliErrorContext, CliResult};

// ---- Core library imports ----
use deshake_core::discovery::has_video_extension;
use deshake_core::external::{CommandStabilizer, SidecarSpawner, StdFsMetadataProvider};
use deshake_core::{
    CoreConfig, CoreError, StabResult, find_processable_files, format_bytes, format_duration,
    process_videos,
};

/// Resolves the files to process from the input argument, which may be a
/// directory or a single file.
///
/// Returns the effective input directory and the file list. An empty list
/// is not an error here; the caller decides what an empty batch means.
pub fn discover_input_files(input: &Path, include_all: bool) -> CliResult<(PathBuf, Vec<PathBuf>)> {
    let input_path = input
        .canonicalize()
        .cli_with_context(|| format!("Invalid input path '{}'", input.display()))?;

    let metadata = std::fs::metadata(&input_path)?;

    if metadata.is_dir() {
        let files = match find_processable_files(&input_path, include_all) {
            Ok(files) => files,
            Err(CoreError::NoFilesFound) => Vec::new(),
            Err(e) => return Err(e),
        };
        Ok((input_path, files))
    } else if include_all || has_video_extension(&input_path) {
        let parent = input_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((parent, vec![input_path]))
    } else {
        Err(CoreError::Config(format!(
            "'{}' is not a recognized video file (use --all-files to force it)",
            input_path.display()
        )))
    }
}

/// Builds the core configuration from parsed arguments.
fn build_config(args: &RunArgs, input_dir: PathBuf) -> CliResult<CoreConfig> {
    let mut config = CoreConfig::new(input_dir, args.output.clone(), args.work_dir.clone());
    config.stabilizer_bin = args.stab_bin.clone();
    config.stabilizer_args = args.stab_arg.clone();
    config.output_suffix = args.suffix.clone();
    config.output_ext = args.out_ext.clone();
    config.frame_rate = args.fps;
    config.encoder_threads = args.threads;
    config.validate()?;
    Ok(config)
}

/// Entry point for `deshake run`.
pub fn run_batch(args: &RunArgs) -> CliResult<()> {
    let total_start = Instant::now();
    debug!(
        "Run started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let (input_dir, files) = discover_input_files(&args.input, args.all_files)?;
    let config = build_config(args, input_dir)?;

    if files.is_empty() {
        warn!("No processable files found in {}", args.input.display());
        return Ok(());
    }

    info!(
        "{} {} file(s) to process",
        "Found:".cyan().bold(),
        files.len()
    );

    let results = process_videos(
        &CommandStabilizer,
        &SidecarSpawner,
        &StdFsMetadataProvider,
        &config,
        &files,
    )?;

    print_summary(&results, total_start);
    debug!(
        "Run finished: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

/// Prints the per-file and total batch summary.
fn print_summary(results: &[StabResult], total_start: Instant) {
    info!("{}", "========================================".cyan());
    info!(
        "{} {} file(s) in {}",
        "Batch complete:".green().bold(),
        results.len(),
        format_duration(total_start.elapsed().as_secs_f64())
    );
    for result in results {
        info!(
            "  {}  in {}  ({} -> {})",
            result.filename.yellow(),
            format_duration(result.duration.as_secs_f64()),
            format_bytes(result.input_size),
            format_bytes(result.output_size),
        );
    }
}
