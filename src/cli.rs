use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cinemabin")]
#[command(
    author,
    version,
    about = "Reconcile a local movie library with a video collection table"
)]
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
    /// Scan the library and merge it into the collection table
    Sync {
        /// Movies root (overrides [library].root)
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Remote collection CSV (overrides [remote].path)
        #[arg(short, long)]
        remote: Option<PathBuf>,

        /// Merged output CSV (overrides [output].path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse filenames and print the extracted metadata
    Parse {
        /// Filenames to parse
        #[arg(required = true)]
        filenames: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
