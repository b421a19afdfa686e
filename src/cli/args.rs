//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Batch SVG to PNG converter for iOS and Android resource folders
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: svgres.toml)
    #[arg(short = 'C', long, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Convert every configured project
    #[arg(short, long, conflicts_with = "projects")]
    pub all: bool,

    /// Reconvert every output regardless of cache and timestamps
    #[arg(short, long)]
    pub force: bool,

    /// Number of conversion workers (overrides `convert.jobs`)
    #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub jobs: Option<usize>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Projects to convert. Lists the configured projects when omitted.
    #[arg(value_name = "PROJECT")]
    pub projects: Vec<String>,
}

impl Cli {
    /// Whether any conversion was requested.
    pub fn has_selection(&self) -> bool {
        self.all || !self.projects.is_empty()
    }
}
