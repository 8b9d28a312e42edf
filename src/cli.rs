use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipmate")]
#[command(author, version, about = "Smart video trimming: detect dead air, cut it out")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a video and emit a detection report
    Detect {
        /// Video file to analyze
        #[arg(required = true)]
        video: PathBuf,

        /// Detection preset: teaching, meeting, vlog or short
        #[arg(short, long, default_value = "teaching")]
        preset: String,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cut a video according to a detection report
    Cut {
        /// Video file to cut
        #[arg(required = true)]
        video: PathBuf,

        /// Detection report produced by `clipmate detect`
        #[arg(short, long, required = true)]
        report: PathBuf,

        /// Output file (defaults to <name>-edited.<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Probe a video file and display information
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Display version information
    Version,
}
