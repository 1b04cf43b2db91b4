//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::toolkit::StylePreference;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    pub version: u32,
    /// How event-box backgrounds are painted
    #[serde(default)]
    pub background_style: StylePreference,
    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
    /// Initial attributes of the outer event box, applied in key order
    #[serde(default = "default_eventbox")]
    pub eventbox: BTreeMap<String, serde_json::Value>,
    /// Colors cycled through by button presses
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "kestrel", "kestrel")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            background_style: StylePreference::default(),
            window: WindowConfig::default(),
            eventbox: default_eventbox(),
            palette: default_palette(),
        }
    }
}

fn default_eventbox() -> BTreeMap<String, serde_json::Value> {
    let mut attributes = BTreeMap::new();
    attributes.insert("bg".to_string(), serde_json::json!("#2e3436"));
    attributes.insert(
        "tooltip".to_string(),
        serde_json::json!("Click to change colour"),
    );
    attributes
}

fn default_palette() -> Vec<String> {
    ["#3465a4", "#73d216", "#cc0000", "#f57900"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "kestrel".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            title: default_title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.background_style, StylePreference::Auto);
        assert_eq!(config.eventbox.get("bg"), Some(&serde_json::json!("#2e3436")));
        assert_eq!(config.palette.len(), 4);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(config.window.width, 480);
        assert_eq!(config.window.title, "kestrel");
        assert!(!config.palette.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r##"{
            "version": 1,
            "background_style": "paint",
            "window": { "width": 640, "height": 480, "title": "demo" },
            "eventbox": { "bg": "red", "min_width": 200 },
            "palette": ["#000000"]
        }"##;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.background_style, StylePreference::Paint);
        assert_eq!(config.window.title, "demo");
        assert_eq!(config.eventbox.get("min_width"), Some(&serde_json::json!(200)));
        assert_eq!(config.palette, vec!["#000000".to_string()]);
    }

    #[test]
    fn test_save_and_load_path() {
        let path = std::env::temp_dir()
            .join(format!("kestrel-config-test-{}", std::process::id()))
            .join("config.json");

        let mut config = AppConfig::default();
        config.window.title = "saved".to_string();
        config.background_style = StylePreference::Css;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.window.title, "saved");
        assert_eq!(loaded.background_style, StylePreference::Css);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_path_fails() {
        let path = std::env::temp_dir().join("kestrel-definitely-missing.json");
        assert!(AppConfig::load_from_path(&path).is_err());
    }
}
