//! Application configuration.
//!
//! YAML file with every field optional; precedence is CLI > file > defaults.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_window_width() -> f32 {
    1000.0
}
fn default_window_height() -> f32 {
    900.0
}
fn default_title() -> String {
    "Equipment Charts".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_title(),
        }
    }
}

/// Pixel size of each exported panel image.
///
/// The default mirrors an 8x5 inch figure at 100 DPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_width")]
    pub width: u32,
    #[serde(default = "default_export_height")]
    pub height: u32,
}

fn default_export_width() -> u32 {
    800
}
fn default_export_height() -> u32 {
    500
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: default_export_width(),
            height: default_export_height(),
        }
    }
}

/// CSV header names for each equipment field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_name_col")]
    pub name: String,
    #[serde(default = "default_type_col")]
    pub equipment_type: String,
    #[serde(default = "default_flowrate_col")]
    pub flowrate: String,
    #[serde(default = "default_pressure_col")]
    pub pressure: String,
    #[serde(default = "default_temperature_col")]
    pub temperature: String,
}

fn default_name_col() -> String {
    "Equipment Name".to_string()
}
fn default_type_col() -> String {
    "Type".to_string()
}
fn default_flowrate_col() -> String {
    "Flowrate".to_string()
}
fn default_pressure_col() -> String {
    "Pressure".to_string()
}
fn default_temperature_col() -> String {
    "Temperature".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name: default_name_col(),
            equipment_type: default_type_col(),
            flowrate: default_flowrate_col(),
            pressure: default_pressure_col(),
            temperature: default_temperature_col(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given; a missing file falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => {
                debug!(path = %p.display(), "loading config");
                Self::load(p)
            }
            Some(p) => {
                warn!(path = %p.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
