use serde::Deserialize;
use std::path::Path;

use crate::yaml_include::{YamlIncludeError, load_yaml_with_includes};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    Include {
        #[from]
        source: YamlIncludeError,
    },

    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: serde_yml::Error,
    },
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CommonConfig {
    pub project_name: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RunnerConfig {
    pub threads: u32,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub common: CommonConfig,
    pub runner: RunnerConfig,
}

impl Config {
    /// Load a config file, resolving `!include` directives before parsing.
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let merged = load_yaml_with_includes(Path::new(config_path))?;
        let config = serde_yml::from_str(&merged)?;

        Ok(config)
    }
}
