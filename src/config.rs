//! Configuration management
//!
//! User settings are persisted as TOML under `~/.deepseek-commit/config.toml`.
//! Missing file or missing fields fall back to defaults, so a fresh install
//! works without any setup besides `--api-key`.
//!
//! # Example TOML
//!
//! ```toml
//! api_key = "sk-..."
//! model = "deepseek-chat"
//! commit_style = "conventional"
//! language = "zh-CN"
//! encoding = "utf-8"
//! temperature = 0.7
//! max_diff_length = 3000
//! api_base_url = "https://api.deepseek.com/v1/chat/completions"
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default chat-completions endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Commit message formatting convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommitStyle {
    /// Conventional Commits: `<type>(<scope>): <subject>`
    Conventional,
    /// Plain one-line description
    Simple,
    /// Emoji-prefixed description
    Emoji,
}

impl fmt::Display for CommitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitStyle::Conventional => write!(f, "conventional"),
            CommitStyle::Simple => write!(f, "simple"),
            CommitStyle::Emoji => write!(f, "emoji"),
        }
    }
}

/// Output language for generated messages and CLI notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    #[serde(rename = "zh-CN")]
    #[value(name = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    #[value(name = "en")]
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::ZhCn => write!(f, "zh-CN"),
            Language::En => write!(f, "en"),
        }
    }
}

/// Byte encoding used when writing the generated message to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputEncoding {
    #[serde(rename = "utf-8")]
    #[value(name = "utf-8")]
    Utf8,
    #[serde(rename = "gbk")]
    #[value(name = "gbk")]
    Gbk,
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputEncoding::Utf8 => write!(f, "utf-8"),
            OutputEncoding::Gbk => write!(f, "gbk"),
        }
    }
}

/// Persisted user configuration
///
/// Loaded once at startup and passed by reference through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// DeepSeek API key, empty until the user sets one
    pub api_key: String,
    /// Model name sent with every request
    pub model: String,
    pub commit_style: CommitStyle,
    pub language: Language,
    pub encoding: OutputEncoding,
    /// Sampling temperature, valid range 0.1-1.0
    pub temperature: f32,
    /// Staged diffs longer than this many characters are truncated
    pub max_diff_length: usize,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            commit_style: CommitStyle::Conventional,
            language: Language::ZhCn,
            encoding: OutputEncoding::Utf8,
            temperature: 0.7,
            max_diff_length: 3000,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`
    ///
    /// Returns defaults if the file does not exist. Missing fields take
    /// their default values.
    ///
    /// # Errors
    ///
    /// * File exists but cannot be read
    /// * File is not valid TOML or a field has an invalid value
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::TomlParse(path.display().to_string(), e))
    }

    /// Save configuration to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| ConfigError::FileWrite(path.display().to_string(), e))?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)?;
        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(path.display().to_string(), e))
    }

    /// Set the sampling temperature
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidValue` if outside 0.1-1.0; the previous value
    ///   is left unchanged
    pub fn set_temperature(&mut self, value: f32) -> Result<(), ConfigError> {
        if !(0.1..=1.0).contains(&value) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: format!("{value} is not between 0.1 and 1.0"),
            });
        }
        self.temperature = value;
        Ok(())
    }

    /// Set the maximum diff length in characters
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidValue` if below 100; the previous value is
    ///   left unchanged
    pub fn set_max_diff_length(&mut self, value: usize) -> Result<(), ConfigError> {
        if value < 100 {
            return Err(ConfigError::InvalidValue {
                field: "max_diff_length",
                reason: format!("{value} is below the minimum of 100"),
            });
        }
        self.max_diff_length = value;
        Ok(())
    }

    /// Validate that the configuration is usable for a `run` invocation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_key",
                reason: "not set, configure it with --api-key".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model",
                reason: "cannot be empty".to_string(),
            });
        }
        if !(0.1..=1.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: format!("{} is not between 0.1 and 1.0", self.temperature),
            });
        }
        if self.max_diff_length < 100 {
            return Err(ConfigError::InvalidValue {
                field: "max_diff_length",
                reason: format!("{} is below the minimum of 100", self.max_diff_length),
            });
        }
        Ok(())
    }

    /// API key with the middle elided, for `--show-config`
    pub fn masked_api_key(&self) -> String {
        let key = self.api_key.as_str();
        if key.is_empty() {
            return String::new();
        }
        if key.chars().count() <= 7 {
            return "***".to_string();
        }
        let head: String = key.chars().take(3).collect();
        let tail: String = {
            let chars: Vec<char> = key.chars().collect();
            chars[chars.len() - 4..].iter().collect()
        };
        format!("{head}***{tail}")
    }
}

/// Default on-disk location: `~/.deepseek-commit/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".deepseek-commit").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        // Arrange - path that does not exist
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        // Act
        let config = Config::load(&path).unwrap();

        // Assert - all defaults
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.commit_style, CommitStyle::Conventional);
        assert_eq!(config.language, Language::ZhCn);
        assert_eq!(config.encoding, OutputEncoding::Utf8);
    }

    #[test]
    fn test_save_load_roundtrip() {
        // Arrange - non-default configuration
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            api_key: "sk-test-key-12345".to_string(),
            commit_style: CommitStyle::Emoji,
            language: Language::En,
            encoding: OutputEncoding::Gbk,
            temperature: 0.3,
            max_diff_length: 500,
            ..Config::default()
        };

        // Act
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        // Assert - round-trip equality
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        // Arrange - file with only one field set
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "language = \"en\"\n").unwrap();

        // Act
        let config = Config::load(&path).unwrap();

        // Assert - explicit field applied, rest defaulted
        assert_eq!(config.language, Language::En);
        assert_eq!(config.commit_style, CommitStyle::Conventional);
        assert_eq!(config.max_diff_length, 3000);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "commit_style = \"unclosed").unwrap();

        let result = Config::load(&path);

        assert!(matches!(result, Err(ConfigError::TomlParse(_, _))));
    }

    #[test]
    fn test_load_invalid_enum_value_fails() {
        // Arrange - value outside the enumerated set
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "commit_style = \"haiku\"\n").unwrap();

        // Act
        let result = Config::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_set_temperature_rejects_out_of_range() {
        // Arrange
        let mut config = Config::default();

        // Act
        let result = config.set_temperature(1.5);

        // Assert - error raised, previous value untouched
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "temperature",
                ..
            })
        ));
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_set_temperature_accepts_bounds() {
        let mut config = Config::default();
        assert!(config.set_temperature(0.1).is_ok());
        assert!(config.set_temperature(1.0).is_ok());
        assert_eq!(config.temperature, 1.0);
    }

    #[test]
    fn test_set_max_diff_length_rejects_too_small() {
        // Arrange
        let mut config = Config::default();

        // Act
        let result = config.set_max_diff_length(99);

        // Assert - error raised, previous value untouched
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "max_diff_length",
                ..
            })
        ));
        assert_eq!(config.max_diff_length, 3000);
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = Config::default();

        let result = config.validate();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "api_key",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let config = Config {
            api_key: "sk-test".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_masked_api_key() {
        // Arrange
        let mut config = Config::default();

        // Assert - empty key stays empty
        assert_eq!(config.masked_api_key(), "");

        // Short keys are fully masked
        config.api_key = "short".to_string();
        assert_eq!(config.masked_api_key(), "***");

        // Long keys keep head and tail
        config.api_key = "sk-abcdefgh1234".to_string();
        assert_eq!(config.masked_api_key(), "sk-***1234");
    }
}
