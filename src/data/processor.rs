//! Data Processor Module
//! Volume-range filtering and table category filters over the radar frame.

use super::model::{
    TechnologyEntry, VolumeRange, COL_IS_NEW, COL_NAME, COL_QUADRANT, COL_RING, COL_VOLUME,
};
use polars::prelude::*;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Multiselect state for the technology table.
///
/// An empty set for any field selects nothing, so the table comes out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    pub quadrants: BTreeSet<String>,
    pub rings: BTreeSet<String>,
    pub novelty: BTreeSet<bool>,
}

impl CategorySelection {
    /// Everything that appears in `df` selected.
    pub fn all_of(df: &DataFrame) -> Self {
        Self {
            quadrants: DataProcessor::distinct_strings(df, COL_QUADRANT)
                .into_iter()
                .collect(),
            rings: DataProcessor::distinct_strings(df, COL_RING).into_iter().collect(),
            novelty: DataProcessor::distinct_flags(df).into_iter().collect(),
        }
    }
}

/// Filtering and conversion operations on the radar frame.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows with `start <= volume <= end`, original order preserved.
    pub fn filter_volume_range(
        df: &DataFrame,
        range: VolumeRange,
    ) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(COL_VOLUME)
                    .gt_eq(lit(range.start()))
                    .and(col(COL_VOLUME).lt_eq(lit(range.end()))),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Rows whose quadrant, ring and new flag are all selected.
    pub fn filter_categories(
        df: &DataFrame,
        selection: &CategorySelection,
    ) -> Result<DataFrame, ProcessorError> {
        let quadrants = selection.quadrants.iter().map(|q| lit(q.clone())).collect();
        let rings = selection.rings.iter().map(|r| lit(r.clone())).collect();
        let novelty = selection.novelty.iter().map(|&n| lit(n)).collect();

        let filtered = df
            .clone()
            .lazy()
            .filter(
                any_of(COL_QUADRANT, quadrants)
                    .and(any_of(COL_RING, rings))
                    .and(any_of(COL_IS_NEW, novelty)),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Sorted distinct non-null values of a string column.
    pub fn distinct_strings(df: &DataFrame, column: &str) -> Vec<String> {
        df.column(column)
            .ok()
            .and_then(|c| c.str().ok())
            .map(|ca| {
                ca.into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct values of the new flag, `false` first.
    pub fn distinct_flags(df: &DataFrame) -> Vec<bool> {
        df.column(COL_IS_NEW)
            .ok()
            .and_then(|c| c.bool().ok())
            .map(|ca| {
                ca.into_iter()
                    .flatten()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Materialize frame rows back into entries, skipping rows with nulls.
    pub fn frame_to_entries(df: &DataFrame) -> Result<Vec<TechnologyEntry>, ProcessorError> {
        let names = df.column(COL_NAME)?.str()?;
        let rings = df.column(COL_RING)?.str()?;
        let quadrants = df.column(COL_QUADRANT)?.str()?;
        let flags = df.column(COL_IS_NEW)?.bool()?;
        let volumes = df.column(COL_VOLUME)?.u32()?;

        let entries = names
            .into_iter()
            .zip(rings)
            .zip(quadrants)
            .zip(flags)
            .zip(volumes)
            .filter_map(|((((name, ring), quadrant), is_new), volume)| {
                Some(TechnologyEntry {
                    name: name?.to_string(),
                    ring: ring?.to_string(),
                    quadrant: quadrant?.to_string(),
                    is_new: is_new?,
                    volume: volume?,
                })
            })
            .collect();

        Ok(entries)
    }
}

/// `column == v1 OR column == v2 ...`; no values matches nothing.
fn any_of(column: &str, values: Vec<Expr>) -> Expr {
    values
        .into_iter()
        .map(|v| col(column).eq(v))
        .reduce(|acc, e| acc.or(e))
        .unwrap_or_else(|| lit(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::entries_to_frame;

    fn sample() -> DataFrame {
        entries_to_frame(&[
            TechnologyEntry::new("Kotlin", "Adopt", "Languages", true, 27),
            TechnologyEntry::new("Rust", "Adopt", "Languages", true, 28),
            TechnologyEntry::new("Backstage", "Trial", "Platforms", false, 29),
            TechnologyEntry::new("Rust", "Trial", "Languages", false, 29),
            TechnologyEntry::new("Go", "Assess", "Languages", true, 30),
        ])
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        DataProcessor::frame_to_entries(df)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn range_filter_is_inclusive_and_ordered() {
        let df = sample();
        let out = DataProcessor::filter_volume_range(&df, VolumeRange::new(28, 29).unwrap())
            .unwrap();
        assert_eq!(names(&out), vec!["Rust", "Backstage", "Rust"]);
    }

    #[test]
    fn single_volume_range() {
        let df = sample();
        let out = DataProcessor::filter_volume_range(&df, VolumeRange::new(30, 30).unwrap())
            .unwrap();
        assert_eq!(names(&out), vec!["Go"]);
    }

    #[test]
    fn range_outside_data_is_empty() {
        let df = sample();
        let out =
            DataProcessor::filter_volume_range(&df, VolumeRange::new(1, 5).unwrap()).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn full_range_returns_everything() {
        let df = sample();
        let out =
            DataProcessor::filter_volume_range(&df, VolumeRange::new(1, 30).unwrap()).unwrap();
        assert_eq!(out.height(), df.height());
    }

    #[test]
    fn default_selection_keeps_all_rows() {
        let df = sample();
        let selection = CategorySelection::all_of(&df);
        assert_eq!(
            selection.quadrants.iter().cloned().collect::<Vec<_>>(),
            vec!["Languages", "Platforms"]
        );
        assert_eq!(selection.novelty.len(), 2);

        let out = DataProcessor::filter_categories(&df, &selection).unwrap();
        assert_eq!(out.height(), df.height());
    }

    #[test]
    fn category_filters_combine() {
        let df = sample();
        let mut selection = CategorySelection::all_of(&df);
        selection.rings.remove("Adopt");
        selection.novelty.remove(&false);

        let out = DataProcessor::filter_categories(&df, &selection).unwrap();
        assert_eq!(names(&out), vec!["Go"]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let df = sample();
        let mut selection = CategorySelection::all_of(&df);
        selection.quadrants.clear();

        let out = DataProcessor::filter_categories(&df, &selection).unwrap();
        assert_eq!(out.height(), 0);
    }
}
