use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::system::platform::{self, ColumnLayout};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub lister: ListerConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_filter: String,
    pub dry_run: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_filter: "info".to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListerConfig {
    pub program: String,
    pub layout: LayoutChoice,
}

impl Default for ListerConfig {
    fn default() -> Self {
        ListerConfig {
            program: platform::lister_program().to_string(),
            layout: LayoutChoice::Auto,
        }
    }
}

/// Column layout as written in config or on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutChoice {
    /// Whatever the host `ps` supports
    #[default]
    Auto,
    /// Request the thread count column (`nlwp`)
    Standard,
    /// Omit the thread count column
    Reduced,
}

impl LayoutChoice {
    pub fn resolve(self) -> ColumnLayout {
        match self {
            LayoutChoice::Auto => platform::native_layout(),
            LayoutChoice::Standard => ColumnLayout::Standard,
            LayoutChoice::Reduced => ColumnLayout::Reduced,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("procreap").join("config.toml"))
}

/// Load the config from the default location, falling back to defaults when
/// no file exists there.
pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Ok(Config::default()),
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
