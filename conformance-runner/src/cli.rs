use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "conformance-runner",
    about = "Run the pledge contract scenarios through the adapter"
)]
pub struct Cli {
    /// Only run scenarios whose section or name contains this text
    #[arg(long)]
    pub filter: Option<String>,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// List matching scenarios without running them
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Engine configuration as JSON, e.g. `{ "max_steps": 10000 }`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}
