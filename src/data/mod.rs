//! Data module - radar dataset loading, model and filtering

pub mod loader;
pub mod model;
pub mod processor;

pub use loader::{DataLoader, LoaderError, RadarDataset};
pub use model::{
    CatalogError, RangeError, TechnologyEntry, VolumeCatalog, VolumeInfo, VolumeRange,
};
pub use processor::{CategorySelection, DataProcessor, ProcessorError};
