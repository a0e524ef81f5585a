use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::DEFAULT_CHROME_ALLOWANCE;
use crate::row::RowStyle;
use crate::telemetry::LoggingConfig;

/// Settings of the projects view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Vertical space reserved above the table for the toolbar, in pixels.
    pub chrome_allowance: i64,
    /// Minimum width of the date columns, in pixels.
    pub date_min_width: u32,
    pub logging: LoggingConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            chrome_allowance: DEFAULT_CHROME_ALLOWANCE,
            date_min_width: RowStyle::default().date_min_width,
            logging: LoggingConfig::default(),
        }
    }
}

impl ViewConfig {
    pub fn row_style(&self) -> RowStyle {
        RowStyle {
            date_min_width: self.date_min_width,
        }
    }
}

pub fn load_view_config<P: AsRef<Path>>(path: P) -> Result<ViewConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_view_config_from_str(&content)
}

pub fn load_view_config_from_str(content: &str) -> Result<ViewConfig, ConfigError> {
    let config: ViewConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &ViewConfig) -> Result<(), ConfigError> {
    if config.chrome_allowance < 0 {
        return Err(ConfigError::Validation {
            message: format!(
                "chromeAllowance must not be negative, got {}",
                config.chrome_allowance
            ),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "logging.filter must not be empty".to_string(),
        });
    }

    Ok(())
}
