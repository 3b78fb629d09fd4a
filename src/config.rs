//! Dashboard configuration, read from an optional JSON file in the working directory.

use crate::data::VolumeCatalog;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "radar_lens.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Technology entries JSON.
    pub data_path: PathBuf,
    /// Initially selected start volume.
    pub start_volume: u32,
    /// Initially selected end volume.
    pub end_volume: u32,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            start_volume: 28,
            end_volume: 30,
            window_size: [1400.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Initial `(start, end)` selection, snapped to the catalog when unknown.
    pub fn initial_range(&self, catalog: &VolumeCatalog) -> (u32, u32) {
        let first = catalog.first_id().unwrap_or(self.start_volume);
        let last = catalog.last_id().unwrap_or(self.end_volume);

        let start = if catalog.contains(self.start_volume) {
            self.start_volume
        } else {
            log::warn!("Configured start volume {} is unknown", self.start_volume);
            first
        };
        let end = if catalog.contains(self.end_volume) {
            self.end_volume
        } else {
            log::warn!("Configured end volume {} is unknown", self.end_volume);
            last
        };
        (start, end)
    }
}
