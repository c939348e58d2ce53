//! Application configuration for Postforge.
//!
//! User config lives at `~/.postforge/postforge.toml`.
//! Explicit values override the defaults declared here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PostforgeError, Result};
use crate::types::Sector;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "postforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".postforge";

// ---------------------------------------------------------------------------
// Config structs (matching postforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional cleaning stage.
    #[serde(default)]
    pub cleaner: CleanerConfig,

    /// Which classifier decides the final category.
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Per-sector keyword overrides, keyed by sector literal.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sectors: BTreeMap<String, Vec<String>>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

/// `[cleaner]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Whether the cleaning stage participates at all.
    #[serde(default)]
    pub enabled: bool,

    /// Model identifier handed to the completion backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Content beyond this many characters is cut from the prompt.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,

    /// Run a second, stricter prompt that drops whatever the first pass
    /// left outside the record's sector.
    #[serde(default)]
    pub sector_pass: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            max_prompt_chars: default_max_prompt_chars(),
            sector_pass: false,
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_max_prompt_chars() -> usize {
    3000
}

/// How the final category of a record is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationStrategy {
    /// The keyword-bag scorer's ingestion result is final.
    Score,
    /// The keyword indicator refiner runs last and may override the scorer.
    #[default]
    Refine,
}

/// `[classification]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub strategy: ClassificationStrategy,
}

impl AppConfig {
    /// Parse and validate the `[sectors]` overrides.
    ///
    /// Keys must be sector literals other than `general`; empty keyword
    /// lists are rejected.
    pub fn sector_overrides(&self) -> Result<Vec<(Sector, Vec<String>)>> {
        let mut overrides = Vec::with_capacity(self.sectors.len());
        for (key, keywords) in &self.sectors {
            let sector: Sector = key.parse()?;
            if sector.is_general() {
                return Err(PostforgeError::config(
                    "the `general` sector cannot carry keywords",
                ));
            }
            let keywords: Vec<String> = keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(PostforgeError::config(format!(
                    "sector `{sector}` override has no keywords"
                )));
            }
            overrides.push((sector, keywords));
        }
        Ok(overrides)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.postforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PostforgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.postforge/postforge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PostforgeError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        PostforgeError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    // Surface bad sector keys at load time rather than on first use.
    config.sector_overrides()?;
    Ok(config)
}

/// Write the default config file into `dir`, creating the directory.
/// Returns the path to the created file.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| PostforgeError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PostforgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PostforgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Create `~/.postforge/` and write a default config file there.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}
