use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-importr",
    about = "Import package-manager license listings into a component inventory",
    version
)]
pub struct Cli {
    /// Project path; source paths and the default config location resolve against it
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.license-importr/config.toml, fallback ~/.config/license-importr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show homepage and license URL columns in the report
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary lines
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
