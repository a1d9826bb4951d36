//! Persisted CLI configuration.
//!
//! Stored as YAML at `~/.specter.yaml`. The `OPENAI_API_KEY` environment
//! variable always takes precedence over the file so CI and one-off shells
//! work without touching the config.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const GPT_35_TURBO: &str = "gpt-3.5-turbo";
pub const GPT_4: &str = "gpt-4";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API key for the OpenAI chat completions endpoint.
    #[serde(default)]
    pub openai_api_key: String,
    /// Opt-in to GPT-4 for detection and generation requests.
    #[serde(default)]
    pub enable_gpt_4: bool,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".specter.yaml"))
    }

    /// Loads the config from the default path. A missing file is not an
    /// error; it yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    /// Resolves the API key: environment first, then the config file.
    /// Returns `None` when neither is set.
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }
        if self.openai_api_key.is_empty() {
            None
        } else {
            Some(self.openai_api_key.clone())
        }
    }

    pub fn model(&self) -> &'static str {
        if self.enable_gpt_4 {
            GPT_4
        } else {
            GPT_35_TURBO
        }
    }

    /// Applies a `config set KEY VALUE` assignment. Only the two known keys
    /// are accepted; `ENABLE_GPT_4` must be a literal `true` or `false`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "OPENAI_API_KEY" => {
                self.openai_api_key = value.to_string();
                Ok(())
            }
            "ENABLE_GPT_4" => match value {
                "true" => {
                    self.enable_gpt_4 = true;
                    Ok(())
                }
                "false" => {
                    self.enable_gpt_4 = false;
                    Ok(())
                }
                other => bail!("invalid value: {}. accepts true or false", other),
            },
            other => bail!("invalid key: {}", other),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
