// ============================================================================
// deshake-cli/src/cli.rs
// ============================================================================
//
// COMMAND-LINE INTERFACE: Argument Definitions
//
// clap derive definitions for the `deshake` binary. Defaults reproduce
// the pipeline's classic setup (videostab on PATH, 30 fps, 8 encoder
// threads, `-real-stab.avi` outputs) so a bare `deshake run -i ... -o ...`
// behaves like the original hard-wired tool.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use deshake_core::config::{
    DEFAULT_ENCODER_THREADS, DEFAULT_FRAME_RATE, DEFAULT_OUTPUT_EXT, DEFAULT_OUTPUT_SUFFIX,
    DEFAULT_STABILIZER_BIN,
};

/// Batch video stabilization via an external stabilizer and ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "deshake", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stabilize every video in a directory
    Run(RunArgs),

    /// Show the processing order and output paths without running anything
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory of videos to process (or a single video file)
    #[arg(short, long, value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Directory for stabilized output videos (created if missing)
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Working directory for the stabilizer; frames land in its images/
    /// subdirectory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Stabilizer executable to invoke
    #[arg(
        long,
        value_name = "BIN",
        env = "DESHAKE_STABILIZER",
        default_value = DEFAULT_STABILIZER_BIN
    )]
    pub stab_bin: String,

    /// Extra argument passed to the stabilizer before the input path
    /// (repeatable)
    #[arg(long, value_name = "ARG")]
    pub stab_arg: Vec<String>,

    /// Suffix appended to the input name for the output file
    #[arg(
        long,
        value_name = "SUFFIX",
        default_value = DEFAULT_OUTPUT_SUFFIX,
        allow_hyphen_values = true
    )]
    pub suffix: String,

    /// Output container extension, without a leading dot
    #[arg(long = "ext", value_name = "EXT", default_value = DEFAULT_OUTPUT_EXT)]
    pub out_ext: String,

    /// Frame rate of the reassembled output
    #[arg(
        long,
        value_name = "FPS",
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub fps: u32,

    /// Encoder thread count
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_ENCODER_THREADS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,

    /// Process every regular file, not just recognized video extensions
    #[arg(long)]
    pub all_files: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Directory of videos to inspect (or a single video file)
    #[arg(short, long, value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Directory outputs would be written to
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Suffix appended to the input name for the output file
    #[arg(
        long,
        value_name = "SUFFIX",
        default_value = DEFAULT_OUTPUT_SUFFIX,
        allow_hyphen_values = true
    )]
    pub suffix: String,

    /// Output container extension, without a leading dot
    #[arg(long = "ext", value_name = "EXT", default_value = DEFAULT_OUTPUT_EXT)]
    pub out_ext: String,

    /// Include every regular file, not just recognized video extensions
    #[arg(long)]
    pub all_files: bool,
}
