//! Viewer configuration, read from a JSON file at startup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::cycle::MissingPolicy;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "SUNSPOT_VIEWER_CONFIG";

/// Startup settings. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Monthly sunspot file to open at startup.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// JSON table replacing the built-in image locators.
    #[serde(default)]
    pub image_table: Option<PathBuf>,

    /// Initial moving-average width, in months.
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: i64,

    /// Initial folding period, in years.
    #[serde(default = "default_cycle_period")]
    pub cycle_period: i64,

    /// Initial `[from, to]` year selection, clamped to the data.
    #[serde(default = "default_year_range")]
    pub year_range: [i32; 2],

    #[serde(default = "default_image_label")]
    pub image_label: String,

    #[serde(default)]
    pub fold_missing: MissingPolicy,

    /// Fold only the selected years instead of the whole table.
    #[serde(default)]
    pub fold_selection_only: bool,
}

fn default_smoothing_window() -> i64 {
    1
}

fn default_cycle_period() -> i64 {
    11
}

fn default_year_range() -> [i32; 2] {
    [1749, 2020]
}

fn default_image_label() -> String {
    "MDI Continuum".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            image_table: None,
            smoothing_window: default_smoothing_window(),
            cycle_period: default_cycle_period(),
            year_range: default_year_range(),
            image_label: default_image_label(),
            fold_missing: MissingPolicy::default(),
            fold_selection_only: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load the file named by [`CONFIG_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Reading configuration from {}", path.display());
                Self::from_json_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
