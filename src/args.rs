pub use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Filter for diagnostic logs, e.g. "debug" or "coinwatch=trace"
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}
