use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cp3",
    about = "Module manager for C++: translates .cp3/.mpp modules into .h/.cpp pairs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate module files into header and implementation files
    Translate {
        /// Module files (.cp3 or .mpp); other extensions are skipped
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Regenerate outputs even when they are newer than the input
        #[arg(short, long)]
        force: bool,

        /// Strictness level: 1 (low), 2 (medium) or 3 (high)
        #[arg(short, long, value_name = "N")]
        level: Option<i64>,

        /// Extra header treated as a standard one (not a dependency)
        #[arg(long = "extra-std-header", value_name = "HEADER")]
        extra_std_headers: Vec<String>,
    },

    /// Translate a module in memory and run every check without writing files
    Check {
        /// Module file to check
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Strictness level: 1 (low), 2 (medium) or 3 (high)
        #[arg(short, long, value_name = "N")]
        level: Option<i64>,

        /// Print the program model as JSON
        #[arg(long)]
        dump_model: bool,
    },

    /// Show program name, version and accepted extensions
    Info,
}
