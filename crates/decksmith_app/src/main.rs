mod cli;
mod config;
mod platform;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Args::parse();
    let config = config::load_config(args.config.as_deref())?.with_overrides(&args);

    if args.print_config {
        println!("{}", config.to_ron().context("failed to render configuration")?);
        return Ok(ExitCode::SUCCESS);
    }

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        config.log.level_filter()
    };
    decksmith_logging::initialize(
        config.log.destination.into(),
        level,
        config.log.file.as_deref(),
    );

    let input = platform::input::FormInput::from_args(&args)?;
    platform::run_app(&config, input)
}
