//! Hip - render registered meta, script and link tags.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use hip::cli::{self, Cli, Commands};
use hip::{HipConfig, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = HipConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Render { args } => cli::render::run_render(args, &config),
        Commands::Check => cli::check::run_check(&config),
    }
}
