//! CLI command definitions and dispatch.

pub mod config;
pub mod demo;
pub mod folders;
pub mod upload;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;

/// DropVault: simulated file manager
#[derive(Debug, Parser)]
#[command(name = "dropvault", version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file (skips the layered config/ lookup)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay loaded from config/<env>.toml
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log at the configured level instead of warnings only
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Simulate uploading local files
    Upload(upload::UploadArgs),
    /// List the navigable folders
    Folders,
    /// Run a scripted session exercising every file operation
    Demo(demo::DemoArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load the effective configuration for this invocation
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Upload(args) => upload::execute(args, &config, self.format).await,
            Commands::Folders => folders::execute(&config, self.format),
            Commands::Demo(args) => demo::execute(args, &config, self.format),
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}
