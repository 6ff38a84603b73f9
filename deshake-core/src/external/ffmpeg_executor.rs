// ============================================================================
// deshake-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Process Management and Abstraction
//
// Traits for spawning an ffmpeg process and consuming its event stream,
// plus the concrete implementation backed by ffmpeg-sidecar. The batch
// runner is generic over these traits so tests can substitute scripted
// processes.

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::process::ExitStatus;

use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};

// --- FFmpeg Execution Abstraction ---

/// An active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using the handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Something that can spawn an `FfmpegProcess`.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing
/// `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {e}");
            command_failed_error(
                "ffmpeg (get events)",
                ExitStatus::default(), // Placeholder status
                e.to_string(),
            )
        })?;

        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using ffmpeg-sidecar.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}
