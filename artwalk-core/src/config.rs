//! artwalk configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::DataSource;
use crate::error::{ArtwalkError, ArtwalkResult};
use crate::region::Region;

static DEFAULT_DATA_SOURCE: &str = "~/artwalk/data";

fn default_data_source() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

/// Configuration at ~/.config/artwalk/config.toml, overridable with
/// `ARTWALK_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ArtwalkConfig {
    /// Directory or base URL holding the `{region}_*.json` documents
    #[serde(default = "default_data_source")]
    pub data_source: String,

    #[serde(default)]
    pub default_region: Region,
}

impl Default for ArtwalkConfig {
    fn default() -> Self {
        ArtwalkConfig {
            data_source: default_data_source(),
            default_region: Region::default(),
        }
    }
}

impl ArtwalkConfig {
    pub fn config_path() -> ArtwalkResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ArtwalkError::Config("Could not determine config directory".into()))?
            .join("artwalk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config on first run.
    pub fn load() -> ArtwalkResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ArtwalkResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ARTWALK"))
            .build()
            .map_err(|e| ArtwalkError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ArtwalkError::Config(e.to_string()))
    }

    pub fn data_source(&self) -> ArtwalkResult<DataSource> {
        self.data_source.parse()
    }

    /// Write a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ArtwalkResult<()> {
        let contents = format!(
            "\
# artwalk configuration

# Directory or URL with the sf_/la_ venue and event JSON files:
# data_source = \"{}\"

# Region shown when none is given (sf or la):
# default_region = \"sf\"
",
            DEFAULT_DATA_SOURCE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ArtwalkError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ArtwalkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
