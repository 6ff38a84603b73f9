// ============================================================================
// deshake-cli/src/commands/mod.rs
// ============================================================================
//
// COMMANDS: Subcommand Implementations

pub mod plan;
pub mod run;
