//! Stats module - radar aggregations and per-render reports

mod aggregator;
mod report;

pub use aggregator::{
    AggregateError, CategoryCounts, CategoryField, CumulativeRow, NoveltyCounts, RadarAggregator,
    TechnologyOccurrence, VolumeSummary,
};
pub use report::{RadarReport, ReportError};
