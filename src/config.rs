use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the bundled dataset when set.
    pub data_path: Option<PathBuf>,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Reads `DRAFT_DATA_PATH` and `DRAFT_EXPORT_DIR`; blank values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: path_var("DRAFT_DATA_PATH"),
            export_dir: path_var("DRAFT_EXPORT_DIR").unwrap_or(defaults.export_dir),
        }
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        match &self.data_path {
            Some(path) => Dataset::load(path),
            None => Dataset::bundled().cloned(),
        }
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
