use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{StringKitError, StringKitResult};
use crate::logging::LoggingConfig;
use crate::mbstring::TextMode;
use crate::slug::SlugOptions;
use crate::token::{DEFAULT_RANDOM_LENGTH, DEFAULT_UNIQUE_PREFIX};
use crate::truncate::ELLIPSIS;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub text: TextConfig,
    pub slug: SlugConfig,
    pub token: TokenConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub mode: TextMode,
    pub ellipsis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    pub separator: String,
    pub preserve_numeric_words: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub random_length: usize,
    pub alphanumeric_only: bool,
    pub unique_prefix: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            mode: TextMode::CodePoint,
            ellipsis: ELLIPSIS.to_string(),
        }
    }
}

impl Default for SlugConfig {
    fn default() -> Self {
        let options = SlugOptions::default();
        Self {
            separator: options.separator,
            preserve_numeric_words: options.preserve_numeric_words,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            random_length: DEFAULT_RANDOM_LENGTH,
            alphanumeric_only: false,
            unique_prefix: DEFAULT_UNIQUE_PREFIX.to_string(),
        }
    }
}

impl SlugConfig {
    pub fn options(&self) -> SlugOptions {
        SlugOptions {
            separator: self.separator.clone(),
            preserve_numeric_words: self.preserve_numeric_words,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    pub async fn load() -> Result<Self> {
        let config_path = get_config_path();

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from specific file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content).map_err(|err| {
            warn!("Failed to parse {}: {}", path.display(), err);
            StringKitError::InvalidConfig {
                path: path.display().to_string(),
            }
        })?;

        config.validate()?;

        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StringKitResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|err| StringKitError::config(format!("Cannot serialize configuration: {}", err)))?;
        tokio::fs::write(path, content).await?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Save configuration to the default location
    pub async fn save(&self) -> StringKitResult<()> {
        self.save_to_file(get_config_path()).await
    }

    /// Validate configuration values
    pub fn validate(&self) -> StringKitResult<()> {
        if self.text.ellipsis.is_empty() {
            return Err(StringKitError::config("Text ellipsis must not be empty"));
        }

        let separator = &self.slug.separator;
        if separator.chars().count() > 1 {
            return Err(StringKitError::config(
                "Slug separator must be a single character or empty",
            ));
        }
        if separator.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(StringKitError::config(
                "Slug separator must not be alphanumeric",
            ));
        }

        if self.token.random_length == 0 {
            return Err(StringKitError::config("Token random_length must be > 0"));
        }

        Ok(())
    }
}

/// Get the configuration file path
pub fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "stringkit", "stringkit")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default().join("stringkit.toml"))
}

/// Environment-based configuration overrides
pub struct ConfigOverrides;

impl ConfigOverrides {
    /// Apply environment variable overrides to configuration
    pub fn apply(config: &mut AppConfig) {
        Self::apply_from(config, |key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_from<F>(config: &mut AppConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Text overrides
        if let Some(mode) = lookup(crate::mbstring::TEXT_MODE_ENV) {
            match mode.parse() {
                Ok(mode) => config.text.mode = mode,
                Err(err) => warn!("Ignoring text mode override: {}", err),
            }
        }

        if let Some(ellipsis) = lookup("STRINGKIT_ELLIPSIS") {
            config.text.ellipsis = ellipsis;
        }

        // Slug overrides
        if let Some(separator) = lookup("STRINGKIT_SLUG_SEPARATOR") {
            config.slug.separator = separator;
        }

        // Token overrides
        if let Some(length) = lookup("STRINGKIT_RANDOM_LENGTH") {
            if let Ok(length) = length.parse::<usize>() {
                config.token.random_length = length;
            }
        }

        if let Some(alnum) = lookup("STRINGKIT_ALPHANUMERIC_ONLY") {
            config.token.alphanumeric_only = alnum.to_lowercase() == "true";
        }

        // Logging overrides
        if let Some(level) = lookup("STRINGKIT_LOG_LEVEL") {
            config.logging.level = level;
        }
    }
}
