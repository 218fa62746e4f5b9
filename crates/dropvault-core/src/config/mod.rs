//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that a session can
//! start with no configuration files at all.

pub mod logging;
pub mod simulator;
pub mod workspace;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::simulator::SimulatorConfig;
use self::workspace::WorkspaceConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upload simulation timing.
    #[serde(default)]
    pub simulator: SimulatorConfig,
    /// Seed folders and initial view state.
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `DROPVAULT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::build(builder)
    }

    /// Load configuration from a single explicit file plus the environment.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder().add_source(config::File::with_name(path));
        Self::build(builder)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(document: &str) -> Result<Self, AppError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config: Self = builder
            .add_source(
                config::Environment::with_prefix("DROPVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        self.simulator.validate()?;
        self.workspace.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.simulator.tick_interval_ms, 200);
        assert_eq!(config.simulator.completion_linger_ms, 500);
        assert_eq!(config.workspace.root_folder, "root");
        assert_eq!(config.workspace.folders.len(), 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides_section_fields() {
        let config = AppConfig::from_toml(
            r#"
            [simulator]
            tick_interval_ms = 50
            max_increment = 40.0

            [workspace]
            default_view = "list"
            "#,
        )
        .unwrap();
        assert_eq!(config.simulator.tick_interval_ms, 50);
        assert_eq!(config.simulator.max_increment, 40.0);
        assert_eq!(config.simulator.completion_linger_ms, 500);
        assert_eq!(config.workspace.default_view, "list");
    }

    #[test]
    fn test_rejects_zero_tick_interval() {
        let err = AppConfig::from_toml("[simulator]\ntick_interval_ms = 0\n").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_subnormal_max_increment() {
        let err = AppConfig::from_toml("[simulator]\nmax_increment = 1e-310\n").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_non_positive_max_increment() {
        assert!(AppConfig::from_toml("[simulator]\nmax_increment = 0.0\n").is_err());
        assert!(AppConfig::from_toml("[simulator]\nmax_increment = -5.0\n").is_err());
    }
}
