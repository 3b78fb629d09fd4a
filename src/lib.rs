//! Radar Lens - Technology Radar Volume Analysis
//!
//! Loads technology radar entries, filters them to a range of volumes and
//! aggregates them into the tables and charts of a desktop dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
