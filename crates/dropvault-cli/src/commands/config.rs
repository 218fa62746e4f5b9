//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Summarize the configuration after validation
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => {
            config.validate()?;
            output::print_success("Configuration is valid");
            output::print_kv(
                "Tick interval",
                &format!("{} ms", config.simulator.tick_interval_ms),
            );
            output::print_kv(
                "Max increment",
                &format!("{}%", config.simulator.max_increment),
            );
            output::print_kv(
                "Completion linger",
                &format!("{} ms", config.simulator.completion_linger_ms),
            );
            output::print_kv("Root folder", &config.workspace.root_folder);
            output::print_kv("Folders", &config.workspace.folders.len().to_string());
            output::print_kv("Default view", &config.workspace.default_view);
        }
    }

    Ok(())
}
