//! Command-line interface

pub mod output;

use clap::Parser;

/// Code analysis driver for Python source trees
#[derive(Debug, Parser, Clone)]
#[command(name = "pyaudit")]
#[command(author = "pyaudit Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Run a fixed pipeline of Python analysis tools against a source tree", long_about = None)]
pub struct Cli {
    /// Path to the Python code repository to analyze
    pub path: String,

    /// Enable verbose logging and per-file step detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Entry-point script (relative to the target tree) for the profiling steps
    #[arg(long)]
    pub entry_point: Option<String>,

    /// Never prompt for an entry point; the profiling steps are skipped
    #[arg(long)]
    pub non_interactive: bool,

    /// Print the run summary as JSON after the final banner
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
