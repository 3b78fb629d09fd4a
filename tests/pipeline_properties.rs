use proptest::prelude::*;
use radar_lens::data::loader::entries_to_frame;
use radar_lens::data::{DataProcessor, TechnologyEntry, VolumeRange};
use radar_lens::stats::{CategoryField, RadarAggregator};
use std::collections::BTreeMap;

fn entry_strategy() -> impl Strategy<Value = TechnologyEntry> {
    (
        prop::sample::select(vec!["Rust", "Go", "Kotlin", "Backstage", "Terraform", "Zig"]),
        prop::sample::select(vec!["Adopt", "Trial", "Assess", "Hold"]),
        prop::sample::select(vec![
            "Techniques",
            "Tools",
            "Platforms",
            "Languages & Frameworks",
        ]),
        any::<bool>(),
        1u32..=30,
    )
        .prop_map(|(name, ring, quadrant, is_new, volume)| {
            TechnologyEntry::new(name, ring, quadrant, is_new, volume)
        })
}

fn range_strategy() -> impl Strategy<Value = VolumeRange> {
    (1u32..=30, 1u32..=30)
        .prop_map(|(a, b)| VolumeRange::new(a.min(b), a.max(b)).unwrap())
}

fn filtered(entries: &[TechnologyEntry], range: VolumeRange) -> Vec<TechnologyEntry> {
    let df = entries_to_frame(entries).unwrap();
    let out = DataProcessor::filter_volume_range(&df, range).unwrap();
    DataProcessor::frame_to_entries(&out).unwrap()
}

fn per_volume(entries: &[TechnologyEntry]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for e in entries {
        *counts.entry(e.volume).or_insert(0) += 1;
    }
    counts
}

#[test]
fn worked_example_three_entries() {
    let entries = vec![
        TechnologyEntry::new("Rust", "Adopt", "Languages", true, 28),
        TechnologyEntry::new("Rust", "Trial", "Languages", false, 29),
        TechnologyEntry::new("Go", "Adopt", "Languages", true, 29),
    ];
    let kept = filtered(&entries, VolumeRange::new(28, 29).unwrap());
    assert_eq!(kept, entries);

    let df = entries_to_frame(&kept).unwrap();
    let occ = RadarAggregator::occurrences(&df).unwrap();
    let summary: Vec<(&str, usize, u32, &str)> = occ
        .iter()
        .map(|o| {
            (
                o.technology.as_str(),
                o.occurrences,
                o.first_volume,
                o.latest_ring.as_str(),
            )
        })
        .collect();
    assert_eq!(summary, vec![("Rust", 2, 28, "Trial"), ("Go", 1, 29, "Adopt")]);

    let novelty = RadarAggregator::new_vs_existing(&df).unwrap();
    let rows: Vec<(u32, usize, usize)> = novelty
        .iter()
        .map(|r| (r.volume, r.existing, r.new))
        .collect();
    assert_eq!(rows, vec![(28, 0, 1), (29, 1, 1)]);
}

proptest! {
    #[test]
    fn prop_filter_keeps_exactly_the_range(
        entries in prop::collection::vec(entry_strategy(), 0..60),
        range in range_strategy(),
    ) {
        let expected: Vec<TechnologyEntry> = entries
            .iter()
            .filter(|e| range.contains(e.volume))
            .cloned()
            .collect();
        let kept = filtered(&entries, range);
        prop_assert!(kept.iter().all(|e| range.start() <= e.volume && e.volume <= range.end()));
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_full_range_is_identity(entries in prop::collection::vec(entry_strategy(), 0..60)) {
        let kept = filtered(&entries, VolumeRange::new(1, 30).unwrap());
        prop_assert_eq!(kept, entries);
    }

    #[test]
    fn prop_single_volume_range(
        entries in prop::collection::vec(entry_strategy(), 0..60),
        volume in 1u32..=30,
    ) {
        let kept = filtered(&entries, VolumeRange::new(volume, volume).unwrap());
        prop_assert!(kept.iter().all(|e| e.volume == volume));
        prop_assert_eq!(kept.len(), entries.iter().filter(|e| e.volume == volume).count());
    }

    #[test]
    fn prop_count_by_rows_sum_to_volume_size(
        entries in prop::collection::vec(entry_strategy(), 0..60),
        range in range_strategy(),
    ) {
        let kept = filtered(&entries, range);
        let df = entries_to_frame(&kept).unwrap();
        let sizes = per_volume(&kept);

        for field in [CategoryField::Quadrant, CategoryField::Ring] {
            let counts = RadarAggregator::count_by(&df, field).unwrap();
            prop_assert_eq!(counts.volumes.clone(), sizes.keys().copied().collect::<Vec<_>>());
            for (&volume, &size) in &sizes {
                prop_assert_eq!(counts.volume_total(volume), size);
            }
            prop_assert!(counts.counts.iter().all(|row| row.len() == counts.categories.len()));
        }
    }

    #[test]
    fn prop_new_plus_existing_is_volume_size(
        entries in prop::collection::vec(entry_strategy(), 0..60),
        range in range_strategy(),
    ) {
        let kept = filtered(&entries, range);
        let df = entries_to_frame(&kept).unwrap();
        let sizes = per_volume(&kept);
        let rows = RadarAggregator::new_vs_existing(&df).unwrap();

        prop_assert_eq!(rows.len(), sizes.len());
        for row in &rows {
            prop_assert_eq!(row.existing + row.new, sizes[&row.volume]);
            let new = kept.iter().filter(|e| e.volume == row.volume && e.is_new).count();
            prop_assert_eq!(row.new, new);
        }
    }

    #[test]
    fn prop_cumulative_is_monotone_and_ends_at_total(
        entries in prop::collection::vec(entry_strategy(), 0..60),
        range in range_strategy(),
    ) {
        let kept = filtered(&entries, range);
        let df = entries_to_frame(&kept).unwrap();
        let rows = RadarAggregator::cumulative(&df).unwrap();

        let last_total = rows.last().map(|r| r.cumulative_total).unwrap_or(0);
        prop_assert_eq!(last_total, kept.len());
        let monotone = rows.windows(2).all(|w| {
            w[0].volume < w[1].volume
                && w[0].cumulative_new <= w[1].cumulative_new
                && w[0].cumulative_total <= w[1].cumulative_total
        });
        prop_assert!(monotone);
        if let Some(first) = rows.first() {
            prop_assert_eq!(first.cumulative_total, first.total);
        }
    }

    #[test]
    fn prop_occurrences_account_for_every_entry(
        entries in prop::collection::vec(entry_strategy(), 0..60),
        range in range_strategy(),
        min in 1usize..5,
    ) {
        let kept = filtered(&entries, range);
        let df = entries_to_frame(&kept).unwrap();
        let occ = RadarAggregator::occurrences(&df).unwrap();

        prop_assert_eq!(occ.iter().map(|o| o.occurrences).sum::<usize>(), kept.len());

        let frequent = RadarAggregator::at_least(&occ, min);
        prop_assert!(frequent.iter().all(|o| o.occurrences >= min));
        prop_assert_eq!(frequent.len(), occ.iter().filter(|o| o.occurrences >= min).count());
    }

    #[test]
    fn prop_latest_ring_is_from_highest_volume(
        entries in prop::collection::vec(entry_strategy(), 0..60),
    ) {
        let df = entries_to_frame(&entries).unwrap();
        let occ = RadarAggregator::occurrences(&df).unwrap();

        // name -> (first volume, latest volume, ring at latest volume)
        let mut expected: BTreeMap<&str, (u32, u32, &str)> = BTreeMap::new();
        for e in &entries {
            let slot = expected
                .entry(e.name.as_str())
                .or_insert((e.volume, e.volume, e.ring.as_str()));
            slot.0 = slot.0.min(e.volume);
            if e.volume >= slot.1 {
                slot.1 = e.volume;
                slot.2 = e.ring.as_str();
            }
        }

        prop_assert_eq!(occ.len(), expected.len());
        for o in &occ {
            let (first, _, ring) = expected[o.technology.as_str()];
            prop_assert_eq!(o.first_volume, first);
            prop_assert_eq!(o.latest_ring.as_str(), ring);
        }
    }
}
