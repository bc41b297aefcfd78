use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::analyzer::Analyzer;
use crate::config::{ConfigLoader, CONFIG_ENV};

pub mod commands;

use self::commands::{AnalyzeArgs, CleanArgs, ListArgs, NewArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tasksense",
    version,
    about = "Turn free-form to-do text into due dates, priorities and subtasks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file location (takes precedence over TASKSENSE_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze task text and print the derived hints
    Analyze(AnalyzeArgs),
    /// Strip punctuation, profanity and filler words from text
    Clean(CleanArgs),
    /// Build a task from text, committing the suggested fields, and print it as JSON
    New(NewArgs),
    /// Print a JSON task list grouped by due date
    List(ListArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var(CONFIG_ENV, path);
    }

    init_tracing(&cli.log_level)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;
    let loader = ConfigLoader::discover()?;
    let config = loader.load_or_init()?;
    tracing::debug!(config_file = %loader.paths().config_file.display(), "configuration loaded");

    let analyzer = Analyzer::new(config.analyzer);
    match cli.command {
        Commands::Analyze(args) => commands::analyze(&analyzer, config.output, args),
        Commands::Clean(args) => commands::clean(&analyzer, args),
        Commands::New(args) => commands::new_task(&analyzer, args),
        Commands::List(args) => commands::list_tasks(args),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(())
    })
    .map(|_| ())
}
