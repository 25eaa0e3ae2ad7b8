use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub input_root: Option<String>,
    pub output_root: Option<String>,
    pub clock: Option<String>,
    pub threads: Option<usize>,
    pub dedupe_time_rows: Option<bool>,

    // Input layout
    pub input: Option<InputConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct InputConfig {
    /// Subdirectory of `input_root` holding the song catalog
    pub song_data_dir: Option<String>,
    /// Subdirectory of `input_root` holding the activity log
    pub log_data_dir: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
