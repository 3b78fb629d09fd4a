//! Radar Dataset Loader Module
//! Reads the technology entries JSON once at startup and builds the Polars frame.

use super::model::{
    TechnologyEntry, VolumeCatalog, COL_IS_NEW, COL_NAME, COL_QUADRANT, COL_RING, COL_VOLUME,
};
use super::processor::{DataProcessor, ProcessorError};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed radar data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to build data frame: {0}")]
    Polars(#[from] PolarsError),
    #[error("Technology '{name}' references volume {volume}, which is not in the catalog")]
    UnknownVolume { name: String, volume: u32 },
}

/// Loaded, validated radar data plus the volume table it refers to.
///
/// Both halves are immutable after construction; every render pass borrows them.
#[derive(Debug, Clone)]
pub struct RadarDataset {
    frame: DataFrame,
    catalog: VolumeCatalog,
    source: Option<PathBuf>,
}

impl RadarDataset {
    /// Validate entries against the catalog and build the columnar frame.
    ///
    /// Fails on the first entry whose volume is missing from the catalog.
    pub fn from_entries(
        entries: &[TechnologyEntry],
        catalog: VolumeCatalog,
    ) -> Result<Self, LoaderError> {
        if let Some(orphan) = entries.iter().find(|e| !catalog.contains(e.volume)) {
            return Err(LoaderError::UnknownVolume {
                name: orphan.name.clone(),
                volume: orphan.volume,
            });
        }

        Ok(Self {
            frame: entries_to_frame(entries)?,
            catalog,
            source: None,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn catalog(&self) -> &VolumeCatalog {
        &self.catalog
    }

    /// File the dataset was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// All entries in load order.
    pub fn entries(&self) -> Result<Vec<TechnologyEntry>, ProcessorError> {
        DataProcessor::frame_to_entries(&self.frame)
    }
}

/// Build the five-column frame used by every downstream query.
pub fn entries_to_frame(entries: &[TechnologyEntry]) -> Result<DataFrame, PolarsError> {
    let mut names: Vec<String> = Vec::with_capacity(entries.len());
    let mut rings: Vec<String> = Vec::with_capacity(entries.len());
    let mut quadrants: Vec<String> = Vec::with_capacity(entries.len());
    let mut is_new: Vec<bool> = Vec::with_capacity(entries.len());
    let mut volumes: Vec<u32> = Vec::with_capacity(entries.len());

    for entry in entries {
        names.push(entry.name.clone());
        rings.push(entry.ring.clone());
        quadrants.push(entry.quadrant.clone());
        is_new.push(entry.is_new);
        volumes.push(entry.volume);
    }

    DataFrame::new(vec![
        Column::new(COL_NAME.into(), names),
        Column::new(COL_RING.into(), rings),
        Column::new(COL_QUADRANT.into(), quadrants),
        Column::new(COL_IS_NEW.into(), is_new),
        Column::new(COL_VOLUME.into(), volumes),
    ])
}

/// Handles the one-time load of the radar entries file.
pub struct DataLoader;

impl DataLoader {
    /// Load a records-oriented JSON array:
    ///
    /// ```json
    /// [{"name": "Rust", "ring": "Adopt", "quadrant": "Languages & Frameworks",
    ///   "isNew": "TRUE", "volume": 28}]
    /// ```
    pub fn load_json(path: &Path, catalog: VolumeCatalog) -> Result<RadarDataset, LoaderError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dataset = Self::parse_json(&text, catalog)?;
        dataset.source = Some(path.to_path_buf());

        log::info!(
            "Loaded {} technology entries from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse entries from JSON text.
    pub fn parse_json(text: &str, catalog: VolumeCatalog) -> Result<RadarDataset, LoaderError> {
        let entries: Vec<TechnologyEntry> = serde_json::from_str(text)?;
        log::debug!("Parsed {} raw entries", entries.len());
        RadarDataset::from_entries(&entries, catalog)
    }
}
