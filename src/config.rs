// Configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::AppConfig;

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("quickstudy");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn get_log_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("quickstudy.log"))
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path()?)
}

/// Load the config at `path`, writing the defaults there first if it is missing.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_config = AppConfig::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path).context("Failed to read config file")?;

    let config: AppConfig = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, contents).context("Failed to write config file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlankTopicPolicy, GeneratorBackend, Tone};
    use tempfile::TempDir;

    #[test]
    fn test_load_config_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(path.exists(), "default config should be written to disk");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = AppConfig {
            default_topic: "Photosynthesis".to_string(),
            default_tone: Tone::Detailed,
            blank_topic: BlankTopicPolicy::Reject,
            ..Default::default()
        };
        config.generator.backend = GeneratorBackend::Ollama;
        config.generator.ollama_url = "http://custom:8080".to_string();

        save_config_to(&path, &config).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_tone = 42").unwrap();

        let result = load_config_from(&path);
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_file_format() {
        let serialized = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(serialized.contains("default_topic = \"Operating System\""));
        assert!(serialized.contains("default_tone = \"simple\""));
        assert!(serialized.contains("blank_topic = \"ignore\""));
        assert!(serialized.contains("[generator]"));
        assert!(serialized.contains("backend = \"mock\""));
    }
}
