//! CLI entry point for the photographic mosaic tool

use clap::Parser;
use env_logger::Env;
use photomosaic::io::cli::{Cli, CollageProcessor};

fn main() -> photomosaic::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let processor = CollageProcessor::new(cli);
    processor.process()
}
