use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{CompatibilityCalculator, ReferenceTables, TablesError};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub profiles: ProfileSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Scoring reference tables
///
/// Tables are read inline from the `scoring` section, or from a separate
/// TOML file when `tables_path` is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    pub tables_path: Option<PathBuf>,
    #[serde(flatten)]
    pub tables: ReferenceTables,
}

impl ScoringSettings {
    /// Resolve the reference tables to use
    pub fn reference_tables(&self) -> Result<ReferenceTables, TablesError> {
        match &self.tables_path {
            Some(path) => ReferenceTables::load_from(path),
            None => Ok(self.tables.clone()),
        }
    }

    /// Build the scoring engine from configured tables
    pub fn build_calculator(&self) -> Result<CompatibilityCalculator, TablesError> {
        self.reference_tables()?.build_calculator()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSettings {
    /// JSON array of user records loaded at startup
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COMPAT_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMPAT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("COMPAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COMPAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
