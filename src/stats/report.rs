//! Render-pass report: validated range, filtered frame and every aggregate the dashboard shows.

use super::aggregator::{
    AggregateError, CategoryCounts, CategoryField, CumulativeRow, NoveltyCounts, RadarAggregator,
    TechnologyOccurrence, VolumeSummary,
};
use crate::data::{
    CategorySelection, DataProcessor, ProcessorError, RadarDataset, RangeError, TechnologyEntry,
    VolumeRange,
};
use polars::prelude::DataFrame;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Start volume cannot be greater than end volume. Please adjust your selection.")]
    InvalidRange(#[source] RangeError),
    #[error("Unknown volume: {0}")]
    UnknownVolume(#[source] RangeError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl From<RangeError> for ReportError {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::StartAfterEnd { .. } => ReportError::InvalidRange(err),
            RangeError::UnknownVolume(_) => ReportError::UnknownVolume(err),
        }
    }
}

/// Everything one render pass needs, computed from a single volume range.
#[derive(Debug, Clone)]
pub struct RadarReport {
    pub range: VolumeRange,
    pub start_label: String,
    pub end_label: String,
    /// Range-filtered rows; every chart is built from this frame.
    pub filtered: DataFrame,
    pub quadrant_counts: CategoryCounts,
    pub ring_counts: CategoryCounts,
    pub novelty: Vec<NoveltyCounts>,
    pub cumulative: Vec<CumulativeRow>,
    pub occurrences: Vec<TechnologyOccurrence>,
    pub volume_summaries: Vec<VolumeSummary>,
}

impl RadarReport {
    /// Validate `[start, end]` and run the filter plus all aggregators.
    ///
    /// An invalid range aborts before any filtering happens.
    pub fn build(dataset: &RadarDataset, start: u32, end: u32) -> Result<Self, ReportError> {
        let catalog = dataset.catalog();
        let range = catalog.range(start, end)?;

        let filtered = DataProcessor::filter_volume_range(dataset.frame(), range)?;
        log::debug!(
            "Volume range {} selected {} of {} entries",
            range,
            filtered.height(),
            dataset.len()
        );

        let quadrant_counts = RadarAggregator::count_by(&filtered, CategoryField::Quadrant)?;
        let ring_counts = RadarAggregator::count_by(&filtered, CategoryField::Ring)?;
        let novelty = RadarAggregator::new_vs_existing(&filtered)?;
        let cumulative = RadarAggregator::cumulate(&novelty);
        let occurrences = RadarAggregator::occurrences(&filtered)?;
        let volume_summaries = RadarAggregator::volume_summaries(&novelty, catalog);

        Ok(Self {
            range,
            start_label: catalog.label(range.start()),
            end_label: catalog.label(range.end()),
            filtered,
            quadrant_counts,
            ring_counts,
            novelty,
            cumulative,
            occurrences,
            volume_summaries,
        })
    }

    /// Default multiselect state: every value present in the range.
    pub fn default_selection(&self) -> CategorySelection {
        CategorySelection::all_of(&self.filtered)
    }

    /// Range-filtered rows further narrowed by the table multiselects.
    pub fn table_entries(
        &self,
        selection: &CategorySelection,
    ) -> Result<Vec<TechnologyEntry>, ReportError> {
        let narrowed = DataProcessor::filter_categories(&self.filtered, selection)?;
        Ok(DataProcessor::frame_to_entries(&narrowed)?)
    }

    pub fn entry_count(&self) -> usize {
        self.filtered.height()
    }

    pub fn frequent_technologies(&self, min_occurrences: usize) -> Vec<TechnologyOccurrence> {
        RadarAggregator::at_least(&self.occurrences, min_occurrences)
    }
}
