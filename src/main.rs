use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tabfill_cli::cli::{
    cmd_config, cmd_match, cmd_run, init_logging, ConfigArgs, MatchArgs, OutputFormat, RunArgs,
};
use tabfill_cli::load_config;
use tracing::debug;

/// Tabfill - fill consecutive form fields from tab-delimited text
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a page fixture from clipboard text
    Run(RunArgs),

    /// Show which option a value would select, without changing the page
    Match(MatchArgs),

    /// Inspect the configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.debug, cli.log_json)?;

    let loaded = load_config(cli.config.as_deref()).await?;
    debug!(path = %loaded.path.display(), from_file = loaded.from_file, "configuration ready");

    match cli.command {
        Commands::Run(args) => cmd_run(args, &loaded.config.autofill, cli.output).await,
        Commands::Match(args) => cmd_match(args, &loaded.config.autofill.select, cli.output).await,
        Commands::Config(args) => cmd_config(args, &loaded, cli.output).await,
    }
}
