//! Configuration persistence: load and save [`ScatterPlotConfig`] as JSON or
//! YAML files. The format is picked from the file extension.

use std::path::Path;

use crate::config::ScatterPlotConfig;
use crate::error::ConfigError;

/// File formats understood by [`load_config`] and [`save_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from `path`'s extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }
}

/// Serialize a config to text in the given format.
pub fn config_to_string(config: &ScatterPlotConfig, format: ConfigFormat) -> Result<String, ConfigError> {
    Ok(match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Parse and validate a config. Missing fields take their defaults.
pub fn config_from_str(text: &str, format: ConfigFormat) -> Result<ScatterPlotConfig, ConfigError> {
    let config: ScatterPlotConfig = match format {
        ConfigFormat::Json => serde_json::from_str(text)?,
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
    };
    config.validate()?;
    Ok(config)
}

/// Save the config to `path`.
pub fn save_config(config: &ScatterPlotConfig, path: &Path) -> Result<(), ConfigError> {
    let txt = config_to_string(config, ConfigFormat::from_path(path)?)?;
    std::fs::write(path, txt)?;
    log::info!("saved config to {}", path.display());
    Ok(())
}

/// Load and validate the config stored at `path`.
pub fn load_config(path: &Path) -> Result<ScatterPlotConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let txt = std::fs::read_to_string(path)?;
    let config = config_from_str(&txt, format)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}
