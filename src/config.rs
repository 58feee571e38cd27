//! Configuration management for patx
//!
//! Matching options and logging settings can be read from a TOML file,
//! by default ~/.patx/config.toml. Every section and field is optional.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::regex_error::PatternError;

/// Smallest accepted compiled-program size limit
pub const MIN_SIZE_LIMIT: usize = 1024;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// patx configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Regex builder options applied by `Matcher::with_options`
    #[serde(default)]
    pub matching: MatchOptions,

    /// Diagnostic logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options mapped onto the engine's builder
///
/// The defaults are the engine defaults, which is what the free functions in
/// [`crate::pattern`] compile with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries
    pub multi_line: bool,
    /// `.` also matches `\n`
    pub dot_matches_new_line: bool,
    /// Whitespace and `#` comments in the pattern are ignored
    pub ignore_whitespace: bool,
    /// Upper bound on the compiled program in bytes; engine default when unset
    pub size_limit: Option<usize>,
}

impl MatchOptions {
    /// Compile `pattern` with these options
    pub fn build(&self, pattern: &str) -> Result<Regex, PatternError> {
        let mut builder = RegexBuilder::new(pattern);
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }

        builder
            .build()
            .map_err(|err| PatternError::from_regex_error(err, pattern))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter level used when RUST_LOG is not set
    pub level: String,

    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Get the default configuration file path
pub fn default_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    Ok(home_dir.join(".patx").join("config.toml"))
}

/// Load and validate configuration from `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    Config::from_toml_str(&config_str)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Load configuration, falling back to defaults when the file does not exist
///
/// A file that exists but cannot be parsed is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    load_config(path)
}

/// Save configuration to `path`, creating parent directories
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let config_str = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, config_str)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(limit) = config.matching.size_limit {
        if limit < MIN_SIZE_LIMIT {
            anyhow::bail!(
                "Invalid size_limit: {} (min {} bytes)",
                limit,
                MIN_SIZE_LIMIT
            );
        }
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        anyhow::bail!(
            "Invalid log level: {} (must be one of {})",
            config.logging.level,
            LOG_LEVELS.join(", ")
        );
    }

    Ok(())
}
