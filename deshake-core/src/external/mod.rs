// ============================================================================
// deshake-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Subprocess Boundary
//
// Everything that crosses a process boundary lives under this module: the
// stabilizer invocation, the ffmpeg frame-assembly invocation, dependency
// probing, and the filesystem metadata lookup the runner sorts by. The
// process-shaped pieces sit behind small traits so the pipeline can be
// tested without spawning anything.

pub mod ffmpeg;
pub mod ffmpeg_executor;

#[cfg(feature = "test-mocks")]
pub mod mocks;

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_start_error};

pub use ffmpeg::{AssembleParams, build_assemble_command, run_frame_assembly};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarSpawner};

/// Checks that an external command exists and can be spawned.
///
/// The command is run with a benign probe argument and its output
/// discarded. Any exit status counts as "found"; only a failure to spawn
/// at all is reported, distinguishing a missing binary from other spawn
/// errors.
pub fn check_dependency(cmd_name: &str, probe_arg: &str) -> CoreResult<()> {
    debug!("Checking for dependency: {cmd_name}");

    let status = Command::new(cmd_name)
        .arg(probe_arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(err) => Err(command_start_error(cmd_name, err)),
    }
}

/// Filesystem metadata lookup used for size-based ordering and the run
/// summary. Abstracted so tests can dictate sizes.
pub trait FileMetadataProvider {
    /// Size of the file at `path` in bytes.
    fn get_size(&self, path: &Path) -> CoreResult<u64>;
}

/// `FileMetadataProvider` backed by `std::fs::metadata`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFsMetadataProvider;

impl FileMetadataProvider for StdFsMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        Ok(std::fs::metadata(path)?.len())
    }
}

/// Invokes the external stabilizer for one input file.
///
/// The stabilizer contract: given `<stabilizer_bin> [args...] <input>`, run
/// with the work directory as its working directory, it writes stabilized
/// frames as an 8-digit zero-padded JPEG sequence into `images/`. Nothing
/// verifies that contract here; the encoder simply reads whatever frames
/// exist afterwards.
pub trait StabilizerRunner {
    /// Runs the stabilizer to completion and returns its exit status.
    ///
    /// A non-zero exit is NOT an error at this level; only failing to
    /// spawn or wait is. The batch runner decides what failure means.
    fn run(&self, config: &CoreConfig, input_path: &Path) -> CoreResult<ExitStatus>;
}

/// `StabilizerRunner` that spawns the configured binary via
/// `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandStabilizer;

impl StabilizerRunner for CommandStabilizer {
    fn run(&self, config: &CoreConfig, input_path: &Path) -> CoreResult<ExitStatus> {
        let mut command = Command::new(&config.stabilizer_bin);
        command
            .args(&config.stabilizer_args)
            .arg(input_path)
            .current_dir(&config.work_dir);

        debug!("Running stabilizer: {command:?}");

        // Stdio is inherited so the stabilizer's own console output
        // streams through while it works.
        command
            .status()
            .map_err(|err| command_start_error(config.stabilizer_bin.as_str(), err))
    }
}
