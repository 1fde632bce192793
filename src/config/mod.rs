//! Configuration management for the visitor counter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Production visitor count endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://qifolf6l45.execute-api.us-east-1.amazonaws.com/prod/count";

/// Default locator of the status region.
pub const DEFAULT_STATUS_REGION: &str = "counter";

/// Default locator of the message region.
pub const DEFAULT_MESSAGE_REGION: &str = "message";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widget configuration.
    pub widget: WidgetConfig,
}

/// Endpoint and region locators the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Counting endpoint queried with GET.
    pub endpoint: String,

    /// Locator of the region showing the count.
    pub status_region: String,

    /// Locator of the region showing status messages.
    pub message_region: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            status_region: DEFAULT_STATUS_REGION.to_string(),
            message_region: DEFAULT_MESSAGE_REGION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// Loads global config first, then merges project-local config if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        if let Ok(project_path) = Self::project_config_path() {
            if project_path.exists() {
                let contents = std::fs::read_to_string(&project_path)?;
                let project_config: Self = toml::from_str(&contents)?;
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Get the project-local configuration file path.
    ///
    /// Looks for `.visitor-counter/config.toml` in the current directory.
    pub fn project_config_path() -> anyhow::Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(cwd.join(".visitor-counter").join("config.toml"))
    }

    /// Merge another config into this one (project overrides global).
    fn merge(&mut self, other: Self) {
        let defaults = WidgetConfig::default();

        if other.widget.endpoint != defaults.endpoint {
            self.widget.endpoint = other.widget.endpoint;
        }
        if other.widget.status_region != defaults.status_region {
            self.widget.status_region = other.widget.status_region;
        }
        if other.widget.message_region != defaults.message_region {
            self.widget.message_region = other.widget.message_region;
        }
    }

    /// Get the configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the config directory path (`~/.config/visitor-counter/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config_home).join("visitor-counter"));
        }

        let base = directories::BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

        Ok(base.config_dir().join("visitor-counter"))
    }

    /// Save the endpoint to the global config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_endpoint(endpoint: &str) -> anyhow::Result<()> {
        Self::save_endpoint_to_path(endpoint, &Self::config_path()?)
    }

    /// Save the endpoint to `path`, keeping every other key already in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or written.
    pub fn save_endpoint_to_path(endpoint: &str, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut config_value = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<toml::Value>(&contents)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let config_table = config_value
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("config root must be a table"))?;

        let widget_table = config_table
            .entry("widget")
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()))
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("widget section must be a table"))?;

        widget_table.insert(
            "endpoint".to_string(),
            toml::Value::String(endpoint.to_string()),
        );

        std::fs::write(path, toml::to_string_pretty(&config_value)?)?;
        tracing::info!(path = %path.display(), endpoint = %endpoint, "endpoint saved");
        Ok(())
    }
}
