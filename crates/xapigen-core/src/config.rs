//! Generator configuration (`xapigen.toml`)

use crate::error::{GenError, GenResult};
use crate::naming::Normalizer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub naming: NamingConfig,
}

/// Paths and switches for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Description document to read
    #[serde(default = "default_description")]
    pub description: PathBuf,

    /// Output location, owned exclusively by the generator and recreated each run
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Directory holding hand-written extension sources
    #[serde(default = "default_extras")]
    pub extras: PathBuf,

    /// Hand-written file linked verbatim into the output (relative to `extras`)
    #[serde(default = "default_passthrough")]
    pub passthrough: String,

    /// Fail the run when any message is skipped for an unsupported type-expression
    #[serde(default)]
    pub strict: bool,

    /// Default log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Identifier normalization settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Extra reserved-word replacements, applied on top of the built-in table
    #[serde(default)]
    pub reserved: BTreeMap<String, String>,
}

fn default_description() -> PathBuf {
    PathBuf::from("xenapi.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

fn default_extras() -> PathBuf {
    PathBuf::from("extras")
}

fn default_passthrough() -> String {
    "client.rs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            description: default_description(),
            output: default_output(),
            extras: default_extras(),
            passthrough: default_passthrough(),
            strict: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> GenResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> GenResult<()> {
        if self.generator.output.as_os_str().is_empty() {
            return Err(GenError::Config("output location cannot be empty".into()));
        }

        if self.generator.passthrough.is_empty() {
            return Err(GenError::Config("passthrough file name cannot be empty".into()));
        }

        for (from, to) in &self.naming.reserved {
            if to.is_empty() || !to.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(GenError::Config(format!(
                    "reserved replacement for '{from}' must be a plain identifier, got '{to}'"
                )));
            }
        }

        Ok(())
    }

    /// Build the identifier normalizer described by the `[naming]` section
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new().with_reserved(self.naming.reserved.clone())
    }

    /// Path of the hand-written passthrough file
    pub fn passthrough_path(&self) -> PathBuf {
        self.generator.extras.join(&self.generator.passthrough)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
