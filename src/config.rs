//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. TOML file: `github-dashboard.toml` in the working directory, or `--config`
//! 3. Environment variables: `GITHUB_DASHBOARD_*`, nested keys split on `__`
//!    (e.g. `GITHUB_DASHBOARD_DATA__PATH`)
//!
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! [data]
//! path = "./data/github_dataset.csv"
//!
//! [display]
//! top_n = 10
//! table_rows = 100
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "github-dashboard.toml";
pub const ENV_PREFIX: &str = "GITHUB_DASHBOARD_";
/// Upper bound for `display.top_n`, also the sidebar slider's maximum.
pub const MAX_TOP_N: usize = 50;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Figment(Box<figment::Error>),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV with the repository metadata.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/github_dataset.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Entries shown in every ranking.
    pub top_n: usize,
    /// Rows shown in the raw data table.
    pub table_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            table_rows: 100,
        }
    }
}

impl Config {
    /// Load from defaults, the TOML file and the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOP_N).contains(&self.display.top_n) {
            return Err(ConfigError::Invalid(format!(
                "display.top_n must be between 1 and {MAX_TOP_N}"
            )));
        }
        if self.display.table_rows == 0 {
            return Err(ConfigError::Invalid(
                "display.table_rows must be at least 1".into(),
            ));
        }
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data.path must not be empty".into()));
        }
        Ok(())
    }
}
