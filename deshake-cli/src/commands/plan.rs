// ============================================================================
// deshake-cli/src/commands/plan.rs
// ============================================================================
//
// PLAN COMMAND: Dry Run
//
// Prints the order the batch would process files in and the output path
// each would get, without invoking any external tool. Plan output goes to
// stdout; it is the command's data, not logging.

use log::warn;
use std::path::PathBuf;

use crate::cli::PlanArgs;
use crate::error::CliResult;

use super::run::discover_input_files;
use deshake_core::external::{FileMetadataProvider, StdFsMetadataProvider};
use deshake_core::{CoreConfig, format_bytes, plan_work_items};

/// Entry point for `deshake plan`.
pub fn run_plan(args: &PlanArgs) -> CliResult<()> {
    let (input_dir, files) = discover_input_files(&args.input, args.all_files)?;

    let mut config = CoreConfig::new(input_dir, args.output.clone(), PathBuf::from("."));
    config.output_suffix = args.suffix.clone();
    config.output_ext = args.out_ext.clone();
    config.validate()?;

    if files.is_empty() {
        warn!("No processable files found in {}", args.input.display());
        return Ok(());
    }

    let provider = StdFsMetadataProvider;
    let items = plan_work_items(&provider, &config, &files)?;

    println!("Processing plan ({} file(s), smallest first):", items.len());
    for item in &items {
        let size = provider.get_size(&item.input_path)?;
        println!(
            "  {:>10}  {} -> {}",
            format_bytes(size),
            item.input_path.display(),
            item.output_path.display()
        );
    }
    Ok(())
}
