mod batch;
mod cli;
mod console;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use cli::{Cli, Command};
use console::settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::InitConfig) = &cli.command {
        return settings::write_default(&cli.config)
            .with_context(|| format!("writing default settings to {}", cli.config.display()));
    }

    let mut settings = settings::load_settings(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    settings.apply_overrides(&cli);

    let level = if settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    pipeline_logging::initialize(settings.log.into(), level, None);

    match cli.command {
        Some(Command::Run(args)) => batch::run(&settings, args),
        Some(Command::InitConfig) | None => console::run_console(&settings),
    }
}
