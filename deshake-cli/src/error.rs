// ============================================================================
// deshake-cli/src/error.rs
// ============================================================================
//
// ERROR HANDLING: CLI Error Types
//
// The CLI reuses deshake-core's error type directly and adds a small
// extension trait for attaching human-readable context to results on
// their way up to main.

use deshake_core::CoreError;

/// Result type used by CLI commands.
pub type CliResult<T> = Result<T, CoreError>;

/// Extension trait for attaching context to errors.
pub trait CliErrorContext<T> {
    /// Adds fixed context to an error.
    fn cli_context(self, context: &str) -> CliResult<T>;

    /// Adds lazily built context to an error.
    fn cli_with_context<F>(self, context: F) -> CliResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<CoreError>> CliErrorContext<T> for Result<T, E> {
    fn cli_context(self, context: &str) -> CliResult<T> {
        self.map_err(|e| {
            let core: CoreError = e.into();
            CoreError::OperationFailed(format!("{context}: {core}"))
        })
    }

    fn cli_with_context<F>(self, context: F) -> CliResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let core: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {core}", context()))
        })
    }
}
