//! Configuration loading and lexicon resolution
//!
//! Lexicon file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `RR_LEXICON` environment variable
//! 3. `lexicon_path` in the TOML config file
//! 4. Compiled default lexicon (fallback)
//!
//! A missing config file is not an error: a warning is logged and defaults
//! are used. A lexicon file that was explicitly named but cannot be read or
//! parsed is an error.

use crate::lexicon::Lexicon;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming a lexicon file
pub const LEXICON_ENV_VAR: &str = "RR_LEXICON";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "RR_CONFIG";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Lexicon file to load instead of the compiled defaults
    pub lexicon_path: Option<PathBuf>,
    pub logging: LoggingConfig,
}

/// Platform config file path
///
/// `RR_CONFIG` wins when set; otherwise `<config dir>/rhyme-racer/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("rhyme-racer").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Load the config file, falling back to defaults when it is missing or invalid
pub fn load_toml_config_or_default(path: Option<&Path>) -> TomlConfig {
    let Some(path) = path else {
        warn!("Could not determine config directory, using default configuration");
        return TomlConfig::default();
    };

    if !path.exists() {
        warn!("Config file not found: {}, using default configuration", path.display());
        return TomlConfig::default();
    }

    match load_toml_config(path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{} - using default configuration", e);
            TomlConfig::default()
        }
    }
}

/// Write config atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, content)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }
    Ok(())
}

/// Pick the lexicon file to load, if any
pub fn resolve_lexicon_path(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(LEXICON_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    toml_config.lexicon_path.clone()
}

/// Resolve and load the lexicon
///
/// Priority 4 (compiled defaults) applies when nothing names a file.
pub fn load_lexicon(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> Result<Lexicon> {
    match resolve_lexicon_path(cli_arg, toml_config) {
        Some(path) => Lexicon::load(&path),
        None => {
            info!("Using compiled default lexicon");
            Ok(Lexicon::default())
        }
    }
}
