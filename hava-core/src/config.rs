use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::resolver::DerivedDefaults;
use crate::source::DEFAULT_BASE_URL;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// # base_url = "http://api.weatherapi.com/v1"
///
/// [derived]
/// gust_offset_kph = 5.0
/// dew_point_divisor = 5.0
/// utc_offset_seconds = 12600
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather provider API key.
    pub api_key: Option<String>,

    /// Provider endpoint override; mainly useful against a local stub.
    pub base_url: Option<String>,

    /// Constants for estimating fields the provider omits.
    pub derived: Option<DerivedDefaults>,
}

impl Config {
    /// API key, or an actionable error when the app is unconfigured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `hava configure` and enter your provider API key."
            )
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn derived_defaults(&self) -> DerivedDefaults {
        self.derived.unwrap_or_default()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "hava", "hava")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `hava configure`"));
    }

    #[test]
    fn base_url_defaults_and_overrides() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);

        let cfg = Config { base_url: Some("http://localhost:9999/v1".into()), ..Config::default() };
        assert_eq!(cfg.base_url(), "http://localhost:9999/v1");
    }

    #[test]
    fn derived_table_roundtrips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            derived: Some(DerivedDefaults { gust_offset_kph: 7.0, ..DerivedDefaults::default() }),
            ..Config::default()
        };

        let toml = toml::to_string_pretty(&cfg).expect("serializes");
        let back: Config = toml::from_str(&toml).expect("parses");

        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.derived_defaults().gust_offset_kph, 7.0);
        assert_eq!(back.derived_defaults().dew_point_divisor, 5.0);
    }

    #[test]
    fn missing_derived_table_uses_defaults() {
        let cfg: Config = toml::from_str("api_key = \"KEY\"").expect("parses");
        assert_eq!(cfg.derived_defaults(), DerivedDefaults::default());
    }
}
