//! Radar Aggregator Module
//! Per-volume grouping, new-vs-existing trends, cumulative sums and technology occurrences.

use crate::data::model::{
    VolumeCatalog, COL_IS_NEW, COL_NAME, COL_QUADRANT, COL_RING, COL_VOLUME,
};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

const COUNT_COL: &str = "count";
const TOTAL_COL: &str = "total";
const NEW_COL: &str = "new";
const OCCURRENCES_COL: &str = "occurrences";
const FIRST_VOLUME_COL: &str = "first_volume";
const LATEST_RING_COL: &str = "latest_ring";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Categorical column a distribution can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Quadrant,
    Ring,
}

impl CategoryField {
    pub fn column(self) -> &'static str {
        match self {
            CategoryField::Quadrant => COL_QUADRANT,
            CategoryField::Ring => COL_RING,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CategoryField::Quadrant => "Quadrant",
            CategoryField::Ring => "Ring",
        }
    }
}

/// Dense `volume x category` count table; absent pairs are stored as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    pub field: CategoryField,
    /// Ascending volume ids present in the input.
    pub volumes: Vec<u32>,
    /// Distinct category values, sorted.
    pub categories: Vec<String>,
    /// `counts[volume_idx][category_idx]`
    pub counts: Vec<Vec<usize>>,
}

impl CategoryCounts {
    pub fn get(&self, volume: u32, category: &str) -> usize {
        let Some(v) = self.volumes.iter().position(|&id| id == volume) else {
            return 0;
        };
        let Some(c) = self.categories.iter().position(|name| name == category) else {
            return 0;
        };
        self.counts[v][c]
    }

    /// Sum across all categories for one volume.
    pub fn volume_total(&self, volume: u32) -> usize {
        self.volumes
            .iter()
            .position(|&id| id == volume)
            .map(|v| self.counts[v].iter().sum())
            .unwrap_or(0)
    }

    /// `(volume, count)` points for one category, one per volume.
    pub fn series(&self, category_idx: usize) -> Vec<(u32, usize)> {
        self.volumes
            .iter()
            .zip(&self.counts)
            .map(|(&volume, row)| (volume, row.get(category_idx).copied().unwrap_or(0)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

/// New vs. existing technologies in one volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoveltyCounts {
    pub volume: u32,
    pub existing: usize,
    pub new: usize,
}

impl NoveltyCounts {
    pub fn total(&self) -> usize {
        self.existing + self.new
    }
}

/// Per-volume counts plus running sums from the start of the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativeRow {
    pub volume: u32,
    pub new: usize,
    pub total: usize,
    pub cumulative_new: usize,
    pub cumulative_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyOccurrence {
    pub technology: String,
    pub occurrences: usize,
    pub first_volume: u32,
    /// Ring from the highest-volume appearance.
    pub latest_ring: String,
}

/// One line of the volume statistics section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSummary {
    pub volume: u32,
    pub edition: String,
    pub total: usize,
    pub new: usize,
}

/// Pure aggregations over a (range-filtered) radar frame.
pub struct RadarAggregator;

impl RadarAggregator {
    /// Count entries per `(volume, category)` pair, zero-filling missing pairs.
    pub fn count_by(df: &DataFrame, field: CategoryField) -> Result<CategoryCounts, AggregateError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(COL_VOLUME), col(field.column())])
            .agg([col(COL_NAME)
                .count()
                .cast(DataType::UInt32)
                .alias(COUNT_COL)])
            .collect()?;

        let volumes_ca = grouped.column(COL_VOLUME)?.u32()?;
        let categories_ca = grouped.column(field.column())?.str()?;
        let counts_ca = grouped.column(COUNT_COL)?.u32()?;

        let mut cells: BTreeMap<(u32, String), usize> = BTreeMap::new();
        let mut volumes: BTreeSet<u32> = BTreeSet::new();
        let mut categories: BTreeSet<String> = BTreeSet::new();

        for ((volume, category), count) in volumes_ca
            .into_iter()
            .zip(categories_ca)
            .zip(counts_ca)
        {
            if let (Some(volume), Some(category), Some(count)) = (volume, category, count) {
                volumes.insert(volume);
                categories.insert(category.to_string());
                cells.insert((volume, category.to_string()), count as usize);
            }
        }

        let volumes: Vec<u32> = volumes.into_iter().collect();
        let categories: Vec<String> = categories.into_iter().collect();
        let counts = volumes
            .iter()
            .map(|&volume| {
                categories
                    .iter()
                    .map(|category| {
                        cells
                            .get(&(volume, category.clone()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        Ok(CategoryCounts {
            field,
            volumes,
            categories,
            counts,
        })
    }

    /// New vs. existing counts for every volume present, ascending by volume.
    pub fn new_vs_existing(df: &DataFrame) -> Result<Vec<NoveltyCounts>, AggregateError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(COL_VOLUME)])
            .agg([
                col(COL_NAME).count().cast(DataType::UInt32).alias(TOTAL_COL),
                col(COL_IS_NEW)
                    .cast(DataType::UInt32)
                    .sum()
                    .cast(DataType::UInt32)
                    .alias(NEW_COL),
            ])
            .collect()?;

        let volumes = grouped.column(COL_VOLUME)?.u32()?;
        let totals = grouped.column(TOTAL_COL)?.u32()?;
        let news = grouped.column(NEW_COL)?.u32()?;

        let mut rows: Vec<NoveltyCounts> = volumes
            .into_iter()
            .zip(totals)
            .zip(news)
            .filter_map(|((volume, total), new)| {
                let (total, new) = (total? as usize, new.unwrap_or(0) as usize);
                Some(NoveltyCounts {
                    volume: volume?,
                    existing: total.saturating_sub(new),
                    new,
                })
            })
            .collect();

        rows.sort_by_key(|r| r.volume);
        Ok(rows)
    }

    /// Running sums of new and total technologies, restarting at the range start.
    pub fn cumulative(df: &DataFrame) -> Result<Vec<CumulativeRow>, AggregateError> {
        Ok(Self::cumulate(&Self::new_vs_existing(df)?))
    }

    /// Running sums over already computed per-volume counts (must be volume-ascending).
    pub fn cumulate(rows: &[NoveltyCounts]) -> Vec<CumulativeRow> {
        let mut cumulative_new = 0;
        let mut cumulative_total = 0;

        rows.iter()
            .map(|row| {
                cumulative_new += row.new;
                cumulative_total += row.total();
                CumulativeRow {
                    volume: row.volume,
                    new: row.new,
                    total: row.total(),
                    cumulative_new,
                    cumulative_total,
                }
            })
            .collect()
    }

    /// Per-technology occurrence count, first volume and latest ring.
    ///
    /// Rows are sorted by volume (stable) before grouping, so "latest" is the
    /// highest-volume appearance. Output is ordered by count descending, then name.
    pub fn occurrences(df: &DataFrame) -> Result<Vec<TechnologyOccurrence>, AggregateError> {
        let grouped = df
            .clone()
            .lazy()
            .sort(
                [COL_VOLUME],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .group_by_stable([col(COL_NAME)])
            .agg([
                col(COL_VOLUME)
                    .count()
                    .cast(DataType::UInt32)
                    .alias(OCCURRENCES_COL),
                col(COL_VOLUME).first().alias(FIRST_VOLUME_COL),
                col(COL_RING).last().alias(LATEST_RING_COL),
            ])
            .collect()?;

        let names = grouped.column(COL_NAME)?.str()?;
        let counts = grouped.column(OCCURRENCES_COL)?.u32()?;
        let first_volumes = grouped.column(FIRST_VOLUME_COL)?.u32()?;
        let rings = grouped.column(LATEST_RING_COL)?.str()?;

        let mut rows: Vec<TechnologyOccurrence> = names
            .into_iter()
            .zip(counts)
            .zip(first_volumes)
            .zip(rings)
            .filter_map(|(((name, count), first_volume), ring)| {
                Some(TechnologyOccurrence {
                    technology: name?.to_string(),
                    occurrences: count? as usize,
                    first_volume: first_volume?,
                    latest_ring: ring?.to_string(),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then_with(|| a.technology.cmp(&b.technology))
        });
        Ok(rows)
    }

    /// Technologies seen at least `min_occurrences` times.
    pub fn at_least(
        occurrences: &[TechnologyOccurrence],
        min_occurrences: usize,
    ) -> Vec<TechnologyOccurrence> {
        occurrences
            .iter()
            .filter(|o| o.occurrences >= min_occurrences)
            .cloned()
            .collect()
    }

    /// Upper bound for the minimum-occurrence slider (at least 1).
    pub fn max_occurrences(occurrences: &[TechnologyOccurrence]) -> usize {
        occurrences
            .iter()
            .map(|o| o.occurrences)
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Initial slider position: 2 when several technologies are listed, else 1.
    pub fn default_min_occurrences(occurrences: &[TechnologyOccurrence]) -> usize {
        if occurrences.len() > 1 {
            2.min(Self::max_occurrences(occurrences))
        } else {
            1
        }
    }

    /// Attach edition labels to per-volume counts.
    pub fn volume_summaries(rows: &[NoveltyCounts], catalog: &VolumeCatalog) -> Vec<VolumeSummary> {
        rows.iter()
            .map(|row| VolumeSummary {
                volume: row.volume,
                edition: catalog
                    .get(row.volume)
                    .map(|info| info.edition())
                    .unwrap_or_default(),
                total: row.total(),
                new: row.new,
            })
            .collect()
    }
}
