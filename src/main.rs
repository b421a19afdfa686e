//! svgres - batch SVG to PNG conversion for iOS and Android resources.

mod cli;
mod config;
mod freshness;
mod image;
mod logger;
mod manifest;
mod pipeline;
mod plan;
mod queue;
mod utils;

use clap::{ColorChoice, Parser};
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(err) = cli::convert::run(&cli) {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}
