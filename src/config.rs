use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_DIR_NAME};
use crate::errors::{RulebotError, RulebotResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_directory: Option<String>,
    pub tick_rate_ms: u64,
    pub show_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_directory: None,
            tick_rate_ms: 250,
            show_timestamps: true,
        }
    }
}

impl Config {
    /// Configured log directory, or `~/.config/rulebot/logs`.
    pub fn log_dir(&self) -> RulebotResult<PathBuf> {
        match &self.log_directory {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(config_dir()?.join(LOG_DIR_NAME)),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the user's config file into the global config, writing the defaults
/// out first if no file exists yet.
pub fn initialize_config() -> RulebotResult<()> {
    let config_path = get_config_path()?;

    let config = if config_path.exists() {
        load_config_from(&config_path)?
    } else {
        write_default_config(&config_path)?
    };

    *CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
    Ok(())
}

pub fn load_config_from(path: &Path) -> RulebotResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| RulebotError::config_error(format!("Failed to read config file: {}", e)))?;

    let config: Config = serde_json::from_str(&config_str)
        .map_err(|e| RulebotError::config_error(format!("Failed to parse config: {}", e)))?;

    validate_config(&config)?;
    Ok(config)
}

pub fn write_default_config(path: &Path) -> RulebotResult<Config> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RulebotError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| RulebotError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| RulebotError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

fn config_dir() -> RulebotResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| RulebotError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join(CONFIG_DIR_NAME))
}

fn get_config_path() -> RulebotResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

fn validate_config(config: &Config) -> RulebotResult<()> {
    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(RulebotError::config_error(format!(
            "log_level must be one of {}",
            LOG_LEVELS.join(", ")
        )));
    }

    if !(10..=5000).contains(&config.tick_rate_ms) {
        return Err(RulebotError::config_error(
            "tick_rate_ms must be between 10 and 5000",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_log_level() {
        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_tick_rate() {
        let mut config = Config::default();
        config.tick_rate_ms = 0;
        assert!(validate_config(&config).is_err());
        config.tick_rate_ms = 60_000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let written = write_default_config(&path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(written, loaded);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "log_level": "debug" }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.show_timestamps);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(RulebotError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_log_directory() {
        let mut config = Config::default();
        config.log_directory = Some("/tmp/rulebot-logs".to_string());
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/tmp/rulebot-logs"));
    }
}
