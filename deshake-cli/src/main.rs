// ============================================================================
// deshake-cli/src/main.rs
// ============================================================================
//
// DESHAKE: Command-Line Entry Point
//
// Parses arguments, initializes logging, and dispatches to the chosen
// subcommand. Any error reaching this level is fatal: it is logged and
// the process exits 1. Note that external tool failures inside a batch
// are not errors here; the batch reports them and still exits 0.

use clap::Parser;
use log::error;

use deshake_cli::cli::{Cli, Commands};
use deshake_cli::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Run(args) => commands::run::run_batch(args),
        Commands::Plan(args) => commands::plan::run_plan(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
