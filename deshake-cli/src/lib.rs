// ============================================================================
// deshake-cli/src/lib.rs
// ============================================================================
//
// DESHAKE CLI LIBRARY: Module Declarations and Re-exports
//
// Library portion of the CLI, so integration tests can reach the argument
// types and command entry points directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::{Cli, Commands, PlanArgs, RunArgs};
pub use commands::plan::run_plan;
pub use commands::run::run_batch;
