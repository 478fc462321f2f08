//! FILENAME: app/src/config.rs
// PURPOSE: Report configuration loaded from a JSON file.
// CONTEXT: Every field has a default, so an empty object or a partial file is
// a valid configuration.

use engine::WindowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_TITLE: &str = "Transaction Records Report";

/// Which rows an export writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Every loaded record, ignoring filters and sort.
    #[default]
    All,
    /// The current filtered+sorted rows, including rows outside the window.
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub title: String,
    pub window: WindowConfig,
    pub export_scope: ExportScope,
    /// Directory for saved reports. None means the working directory.
    pub export_dir: Option<PathBuf>,
    /// Unified log file. None means console only.
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            title: DEFAULT_REPORT_TITLE.to_string(),
            window: WindowConfig::default(),
            export_scope: ExportScope::All,
            export_dir: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn parse_config(json: &str) -> Result<AppConfig, String> {
    let config: AppConfig =
        serde_json::from_str(json).map_err(|e| format!("Invalid configuration: {}", e))?;
    if config.window.growth_step == 0 {
        return Err("Invalid configuration: window.growthStep must be at least 1".to_string());
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<AppConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {:?}: {}", path, e))?;
    parse_config(&content)
}
