// ============================================================================
// deshake-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// Defines the error enum shared by the whole pipeline, the `CoreResult`
// alias used throughout the crate, and small constructors for the
// subprocess error variants so call sites stay short.
//
// Filesystem problems surface as `Io` and abort a batch; subprocess
// problems surface as the `Command*` variants and are handled (logged,
// then skipped past) by the batch runner.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Boxed source error for subprocess failures, which arrive as different
/// concrete types (`std::io::Error` from Command, ffmpeg-sidecar's own
/// error from spawn/iter).
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur in deshake-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Filesystem or other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A path could not be interpreted (no filename, bad encoding).
    #[error("Path error: {0}")]
    PathError(String),

    /// Input discovery matched nothing.
    #[error("No processable files found in input directory")]
    NoFilesFound,

    /// A required external tool is not installed or not on PATH.
    #[error("External dependency not found: {0}")]
    DependencyNotFound(String),

    /// An external command could not be spawned.
    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] SourceError),

    /// An external command was spawned but could not be waited on.
    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, #[source] SourceError),

    /// An external command ran and reported failure.
    #[error("Command '{0}' failed ({1}): {2}")]
    CommandFailed(String, ExitStatus, String),

    /// Catch-all for operations that failed without a more specific cause.
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type alias for deshake-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandStart` error for a command that failed to spawn.
pub(crate) fn command_start_error(cmd: impl Into<String>, err: impl Into<SourceError>) -> CoreError {
    CoreError::CommandStart(cmd.into(), err.into())
}

/// Builds a `CommandWait` error for a command whose exit could not be
/// collected.
pub(crate) fn command_wait_error(cmd: impl Into<String>, err: impl Into<SourceError>) -> CoreError {
    CoreError::CommandWait(cmd.into(), err.into())
}

/// Builds a `CommandFailed` error for a command that exited unsuccessfully,
/// carrying whatever diagnostic output was captured.
pub(crate) fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    message: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, message.into())
}
