// ============================================================================
// deshake-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger Setup
//
// Stderr logging with colored level tags. `-v` raises the filter from
// Info to Debug. RUST_LOG is not consulted, so runs behave the same in
// every environment.

use colored::Colorize;
use log::LevelFilter;
use std::io::Write;

/// Initializes logging for the process.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_with_level(level);
}

/// Initializes env_logger with the given level filter.
pub fn init_with_level(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            let level_str = match record.level() {
                log::Level::Error => "ERROR".red().bold(),
                log::Level::Warn => "WARN ".yellow().bold(),
                log::Level::Info => "INFO ".green(),
                log::Level::Debug => "DEBUG".blue(),
                log::Level::Trace => "TRACE".magenta(),
            };
            writeln!(buf, "{} {}", level_str, record.args())
        })
        .filter(None, level)
        .init();
}
