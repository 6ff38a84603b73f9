// ============================================================================
// deshake-core/src/external/ffmpeg.rs
// ============================================================================
//
// FFMPEG: Frame Assembly
//
// Builds and runs the ffmpeg invocation that reassembles a stabilized
// frame sequence into a video file:
//
//   ffmpeg -y -threads <N> -f image2 -i <frames>/%08d.jpg -r <fps> <output>
//
// The event stream is drained while the process runs; log output is
// buffered so a failing exit can report the tail of ffmpeg's diagnostics.

use std::path::PathBuf;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use log::{debug, warn};

use crate::error::{CoreResult, command_failed_error};
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};

/// Number of buffered ffmpeg log lines included in a failure report.
const STDERR_TAIL_LINES: usize = 10;

/// Parameters for one frame assembly invocation.
#[derive(Debug, Clone)]
pub struct AssembleParams {
    /// Frame sequence pattern the encoder reads, e.g.
    /// `<work_dir>/images/%08d.jpg`.
    pub frames_pattern: PathBuf,

    /// Path of the video file to write.
    pub output_path: PathBuf,

    /// Frame rate of the output video.
    pub frame_rate: u32,

    /// Thread count hint passed to the encoder.
    pub threads: u32,
}

/// Builds the ffmpeg command for one frame assembly.
///
/// `-r` is placed after the input so it applies to the output stream;
/// `-y` makes an existing output file get silently replaced.
#[must_use]
pub fn build_assemble_command(params: &AssembleParams) -> FfmpegCommand {
    let threads = params.threads.to_string();
    let frame_rate = params.frame_rate.to_string();

    let mut cmd = FfmpegCommand::new();
    cmd.overwrite();
    cmd.args(["-threads", threads.as_str()]);
    cmd.args(["-f", "image2"]);
    cmd.input(params.frames_pattern.to_string_lossy().as_ref());
    cmd.args(["-r", frame_rate.as_str()]);
    cmd.output(params.output_path.to_string_lossy().as_ref());
    cmd
}

/// Runs ffmpeg to assemble the frame sequence into `params.output_path`,
/// blocking until the process exits.
///
/// A non-zero exit becomes `CommandFailed` carrying the tail of ffmpeg's
/// log output. The caller decides whether that aborts anything.
pub fn run_frame_assembly<S: FfmpegSpawner>(spawner: &S, params: &AssembleParams) -> CoreResult<()> {
    debug!(
        "Assembling frames: pattern={}, output={}, fps={}, threads={}",
        params.frames_pattern.display(),
        params.output_path.display(),
        params.frame_rate,
        params.threads
    );

    let cmd = build_assemble_command(params);
    debug!("Running ffmpeg command: {cmd:?}");

    let mut process = spawner.spawn(cmd)?;

    let mut stderr_buffer = String::new();
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(level, message) => {
                stderr_buffer.push_str(&message);
                stderr_buffer.push('\n');
                match level {
                    LogLevel::Fatal | LogLevel::Error => warn!("ffmpeg: {message}"),
                    LogLevel::Warning => debug!("ffmpeg: {message}"),
                    _ => {}
                }
            }
            FfmpegEvent::Error(err) => {
                stderr_buffer.push_str(&err);
                stderr_buffer.push('\n');
            }
            FfmpegEvent::Progress(progress) => {
                debug!(
                    "Assembly progress: frame {} at {:.1} fps",
                    progress.frame, progress.fps
                );
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;

    if status.success() {
        debug!("Frame assembly finished: {}", params.output_path.display());
        Ok(())
    } else {
        let tail = stderr_tail(&stderr_buffer);
        let message = if tail.is_empty() {
            "ffmpeg produced no diagnostic output".to_string()
        } else {
            tail
        };
        Err(command_failed_error("ffmpeg", status, message))
    }
}

/// Last few lines of the buffered ffmpeg output, for failure reports.
fn stderr_tail(buffer: &str) -> String {
    let lines: Vec<&str> = buffer.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
