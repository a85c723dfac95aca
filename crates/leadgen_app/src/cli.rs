use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::console::settings::{LogTarget, SETTINGS_FILENAME};

/// Fetch, filter and mine websites for contact emails.
#[derive(Debug, Parser)]
#[command(name = "leadgen", version, about)]
pub struct Cli {
    /// Settings file (RON). Missing file means defaults.
    #[arg(long, default_value = SETTINGS_FILENAME)]
    pub config: PathBuf,

    /// Use the HTTP backend at this base URL instead of the configured one.
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Directory `email_results.csv` is written to.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every stage once without the interactive console.
    Run(RunArgs),
    /// Write a settings file with default values.
    InitConfig,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Industry keyword for the fetch stage.
    #[arg(long)]
    pub keyword: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// State or city keyword.
    #[arg(long)]
    pub locality: Option<String>,
    #[arg(long, default_value_t = leadgen_core::DEFAULT_FETCH_COUNT)]
    pub count: u32,
    /// Keep only domains that respond.
    #[arg(long)]
    pub domain_active: bool,
    /// Keep only Shopify stores.
    #[arg(long)]
    pub shopify: bool,
    /// Keep only sites loading within 5 seconds.
    #[arg(long)]
    pub load_time: bool,
    /// Comma separated substrings; matching websites are dropped.
    #[arg(long, default_value = "")]
    pub exclude: String,
    /// Start at the filter stage with websites from this CSV file.
    #[arg(long, conflicts_with = "email_csv")]
    pub filter_csv: Option<PathBuf>,
    /// Start at the email stage with websites from this CSV file.
    #[arg(long)]
    pub email_csv: Option<PathBuf>,
}
