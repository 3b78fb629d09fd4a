//! Radar Data Model
//! Technology entries, the volume reference table and validated volume ranges.

use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

/// DataFrame column names shared by the loader, processor and aggregators.
pub const COL_NAME: &str = "name";
pub const COL_RING: &str = "ring";
pub const COL_QUADRANT: &str = "quadrant";
pub const COL_IS_NEW: &str = "is_new";
pub const COL_VOLUME: &str = "volume";

/// Marker the source data uses for a technology's first appearance.
pub const NEW_MARKER: &str = "TRUE";

/// One appearance of a technology in one radar volume.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TechnologyEntry {
    pub name: String,
    pub ring: String,
    pub quadrant: String,
    #[serde(rename = "isNew", deserialize_with = "deserialize_new_flag")]
    pub is_new: bool,
    pub volume: u32,
}

impl TechnologyEntry {
    pub fn new(name: &str, ring: &str, quadrant: &str, is_new: bool, volume: u32) -> Self {
        Self {
            name: name.to_string(),
            ring: ring.to_string(),
            quadrant: quadrant.to_string(),
            is_new,
            volume,
        }
    }
}

/// Accepts the `"TRUE"` string convention as well as plain JSON booleans.
fn deserialize_new_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    Ok(match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(b) => b,
        RawFlag::Text(s) => s == NEW_MARKER,
    })
}

/// Publication metadata for one radar volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub volume_id: u32,
    pub month: u32,
    pub month_str: String,
    pub year: u32,
}

impl VolumeInfo {
    /// "April 2023"
    pub fn edition(&self) -> String {
        format!("{} {}", self.month_str, self.year)
    }

    /// Selector text, e.g. "Volume 28 (April 2023)".
    pub fn label(&self) -> String {
        format!("Volume {} ({})", self.volume_id, self.edition())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Volume catalog is empty")]
    Empty,
    #[error("Volume ids must be strictly increasing: {previous} is followed by {next}")]
    NotIncreasing { previous: u32, next: u32 },
    #[error("Volume {volume_id} has invalid month {month}")]
    InvalidMonth { volume_id: u32, month: u32 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("Start volume {start} is greater than end volume {end}")]
    StartAfterEnd { start: u32, end: u32 },
    #[error("Volume {0} is not in the catalog")]
    UnknownVolume(u32),
}

/// Inclusive `[start, end]` span of volume ids with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRange {
    start: u32,
    end: u32,
}

impl VolumeRange {
    pub fn new(start: u32, end: u32) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn contains(&self, volume: u32) -> bool {
        self.start <= volume && volume <= self.end
    }
}

impl fmt::Display for VolumeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Published radar editions: (volume_id, month, month_str, year).
const RADAR_EDITIONS: [(u32, u32, &str, u32); 30] = [
    (1, 1, "January", 2010),
    (2, 4, "April", 2010),
    (3, 8, "August", 2010),
    (4, 1, "January", 2011),
    (5, 7, "July", 2011),
    (6, 3, "March", 2012),
    (7, 10, "October", 2012),
    (8, 5, "May", 2013),
    (9, 1, "January", 2014),
    (10, 7, "July", 2014),
    (11, 1, "January", 2015),
    (12, 5, "May", 2015),
    (13, 11, "November", 2015),
    (14, 4, "April", 2016),
    (15, 11, "November", 2016),
    (16, 3, "March", 2017),
    (17, 11, "November", 2017),
    (18, 5, "May", 2018),
    (19, 11, "November", 2018),
    (20, 4, "April", 2019),
    (21, 11, "November", 2019),
    (22, 5, "May", 2020),
    (23, 10, "October", 2020),
    (24, 4, "April", 2021),
    (25, 10, "October", 2021),
    (26, 3, "March", 2022),
    (27, 10, "October", 2022),
    (28, 4, "April", 2023),
    (29, 9, "September", 2023),
    (30, 4, "April", 2024),
];

/// Immutable, chronologically ordered reference table of radar volumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeCatalog {
    volumes: Vec<VolumeInfo>,
}

impl VolumeCatalog {
    /// Build a catalog, checking ids are strictly increasing and months valid.
    pub fn new(volumes: Vec<VolumeInfo>) -> Result<Self, CatalogError> {
        if volumes.is_empty() {
            return Err(CatalogError::Empty);
        }

        for info in &volumes {
            if !(1..=12).contains(&info.month) {
                return Err(CatalogError::InvalidMonth {
                    volume_id: info.volume_id,
                    month: info.month,
                });
            }
        }

        for pair in volumes.windows(2) {
            if pair[0].volume_id >= pair[1].volume_id {
                return Err(CatalogError::NotIncreasing {
                    previous: pair[0].volume_id,
                    next: pair[1].volume_id,
                });
            }
        }

        Ok(Self { volumes })
    }

    /// The embedded table of published radar editions.
    pub fn radar_editions() -> Self {
        let volumes = RADAR_EDITIONS
            .iter()
            .map(|&(volume_id, month, month_str, year)| VolumeInfo {
                volume_id,
                month,
                month_str: month_str.to_string(),
                year,
            })
            .collect();
        // Ordered and non-empty; covered by `embedded_catalog_is_valid`.
        Self { volumes }
    }

    pub fn volumes(&self) -> &[VolumeInfo] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Look up a volume by id (binary search, ids are sorted).
    pub fn get(&self, volume_id: u32) -> Option<&VolumeInfo> {
        self.volumes
            .binary_search_by_key(&volume_id, |v| v.volume_id)
            .ok()
            .map(|idx| &self.volumes[idx])
    }

    pub fn contains(&self, volume_id: u32) -> bool {
        self.get(volume_id).is_some()
    }

    pub fn first_id(&self) -> Option<u32> {
        self.volumes.first().map(|v| v.volume_id)
    }

    pub fn last_id(&self) -> Option<u32> {
        self.volumes.last().map(|v| v.volume_id)
    }

    /// Validated range whose endpoints both exist in the catalog.
    pub fn range(&self, start: u32, end: u32) -> Result<VolumeRange, RangeError> {
        for id in [start, end] {
            if !self.contains(id) {
                return Err(RangeError::UnknownVolume(id));
            }
        }
        VolumeRange::new(start, end)
    }

    /// Display label for a volume id, falling back to the bare id.
    pub fn label(&self, volume_id: u32) -> String {
        self.get(volume_id)
            .map(VolumeInfo::label)
            .unwrap_or_else(|| format!("Volume {}", volume_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = VolumeCatalog::radar_editions();
        assert_eq!(catalog.len(), 30);
        assert!(VolumeCatalog::new(catalog.volumes().to_vec()).is_ok());
        assert_eq!(catalog.first_id(), Some(1));
        assert_eq!(catalog.last_id(), Some(30));
    }

    #[test]
    fn catalog_lookup_and_labels() {
        let catalog = VolumeCatalog::radar_editions();
        let info = catalog.get(28).unwrap();
        assert_eq!(info.month, 4);
        assert_eq!(info.edition(), "April 2023");
        assert_eq!(info.label(), "Volume 28 (April 2023)");
        assert!(catalog.get(31).is_none());
        assert_eq!(catalog.label(99), "Volume 99");
    }

    #[test]
    fn catalog_rejects_unordered_ids() {
        let mk = |id| VolumeInfo {
            volume_id: id,
            month: 1,
            month_str: "January".to_string(),
            year: 2020,
        };
        assert_eq!(
            VolumeCatalog::new(vec![mk(2), mk(2)]),
            Err(CatalogError::NotIncreasing { previous: 2, next: 2 })
        );
        assert_eq!(VolumeCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn catalog_rejects_bad_month() {
        let info = VolumeInfo {
            volume_id: 1,
            month: 13,
            month_str: "Smarch".to_string(),
            year: 2020,
        };
        assert_eq!(
            VolumeCatalog::new(vec![info]),
            Err(CatalogError::InvalidMonth { volume_id: 1, month: 13 })
        );
    }

    #[test]
    fn range_requires_start_not_after_end() {
        assert!(VolumeRange::new(28, 28).is_ok());
        assert_eq!(
            VolumeRange::new(29, 28),
            Err(RangeError::StartAfterEnd { start: 29, end: 28 })
        );

        let range = VolumeRange::new(3, 5).unwrap();
        assert!(range.contains(3) && range.contains(5));
        assert!(!range.contains(2) && !range.contains(6));
    }

    #[test]
    fn catalog_range_rejects_unknown_ids() {
        let catalog = VolumeCatalog::radar_editions();
        assert_eq!(catalog.range(0, 5), Err(RangeError::UnknownVolume(0)));
        assert_eq!(catalog.range(5, 31), Err(RangeError::UnknownVolume(31)));
        assert!(catalog.range(1, 30).is_ok());
    }

    #[test]
    fn new_flag_is_converted_at_parse_time() {
        let json = r#"[
            {"name": "Rust", "ring": "Adopt", "quadrant": "Languages", "isNew": "TRUE", "volume": 28},
            {"name": "Go", "ring": "Trial", "quadrant": "Languages", "isNew": "true", "volume": 28},
            {"name": "Zig", "ring": "Assess", "quadrant": "Languages", "isNew": true, "volume": 29},
            {"name": "Perl", "ring": "Hold", "quadrant": "Languages", "isNew": "FALSE", "volume": 29}
        ]"#;
        let entries: Vec<TechnologyEntry> = serde_json::from_str(json).unwrap();
        let flags: Vec<bool> = entries.iter().map(|e| e.is_new).collect();
        assert_eq!(flags, vec![true, false, true, false]);
    }
}
