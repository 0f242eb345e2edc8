use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::trigger::LoadTrigger;

/// Main configuration structure
///
/// Loaded from a TOML file under the user config dir; every field has a
/// default so a missing or partial file still works.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents).map_err(|e| {
                crate::Error::ConfigError(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("foliodeck");

        Ok(config_dir.join("config.toml"))
    }

    /// The trigger policy the list surfaces should use
    pub fn load_trigger(&self) -> LoadTrigger {
        match self.ui.trigger.as_str() {
            "manual" => LoadTrigger::Manual,
            _ => LoadTrigger::Proximity {
                lead: self.ui.proximity_lead,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API namespace
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Items requested per page (the backend default is 12)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    foliodeck_api::DEFAULT_API_BASE.to_string()
}

fn default_page_size() -> u32 {
    12
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Next-page trigger: "auto" (load near the end) or "manual"
    #[serde(default = "default_trigger")]
    pub trigger: String,

    /// How many rows before the end the auto trigger fires
    #[serde(default = "default_proximity_lead")]
    pub proximity_lead: usize,

    /// Enable mouse support in the TUI
    #[serde(default = "default_mouse")]
    pub mouse_enabled: bool,
}

fn default_trigger() -> String {
    "auto".to_string()
}

fn default_proximity_lead() -> usize {
    3
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            proximity_lead: default_proximity_lead(),
            mouse_enabled: default_mouse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.page_size, 12);
        assert_eq!(config.api.base_url, foliodeck_api::DEFAULT_API_BASE);
        assert_eq!(config.ui.trigger, "auto");
        assert_eq!(
            config.load_trigger(),
            LoadTrigger::Proximity { lead: 3 }
        );
    }

    #[test]
    fn test_manual_trigger_selection() {
        let config: Config = toml::from_str("[ui]\ntrigger = \"manual\"\n").unwrap();
        assert_eq!(config.load_trigger(), LoadTrigger::Manual);
        // untouched sections keep their defaults
        assert_eq!(config.api.page_size, 12);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let contents = toml::to_string(&config).unwrap();
        assert!(contents.contains("base_url"));
        assert!(contents.contains("page_size"));
        assert!(contents.contains("trigger"));

        let parsed: Config = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.ui.proximity_lead, 3);
    }
}
