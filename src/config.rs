use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

pub const DEFAULT_SOURCE_DIR: &str = "./";
pub const DEFAULT_OUTPUT_FILEPATH: &str = "geojson_schemas.md";

/// Where to look for GeoJSON files and where to write the schema report.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_filepath: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_filepath: PathBuf::from(DEFAULT_OUTPUT_FILEPATH),
        }
    }
}

impl Config {
    /// Read a YAML config file. Fields missing from the file keep their defaults.
    pub fn from_yaml_file(config_filepath: &Path) -> anyhow::Result<Self> {
        if !config_filepath.exists() {
            return Err(anyhow!("Config file {:?} not found", config_filepath));
        }
        let config_contents = read_to_string(config_filepath)
            .with_context(|| format!("Reading config file {:?}", config_filepath))?;
        Self::from_yaml_str(&config_contents)
            .with_context(|| format!("Parsing config file {:?}", config_filepath))
    }

    pub fn from_yaml_str(config_contents: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if config_contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(config_contents)?)
    }

    /// Replace fields for which an override was given, e.g. from the command line.
    pub fn with_overrides(
        mut self,
        source_dir: Option<PathBuf>,
        output_filepath: Option<PathBuf>,
    ) -> Self {
        if let Some(source_dir) = source_dir {
            self.source_dir = source_dir;
        }
        if let Some(output_filepath) = output_filepath {
            self.output_filepath = output_filepath;
        }
        self
    }
}
