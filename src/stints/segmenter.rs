//! Partition a lap sequence into stints

use std::collections::BTreeSet;
use tracing::debug;

use super::StintAnalysis;
use super::statistics::{round_to, summarize};
use crate::types::{LapRecord, PitThreshold, StintRecord};

/// Segment laps into stints.
///
/// Excluded lap numbers are removed before anything else and appear nowhere
/// in the result. Every remaining lap is either in exactly one stint or is a
/// pit lap (`lap_time > threshold`). A stint's bounds are its first and last
/// retained lap, so a lap excluded mid-stint shortens the stint without moving
/// its bounds.
pub fn segment(
    laps: &[LapRecord],
    threshold: PitThreshold,
    excluded: &BTreeSet<u32>,
) -> StintAnalysis {
    let filtered_laps: Vec<LapRecord> =
        laps.iter().filter(|lap| !excluded.contains(&lap.lap_number)).cloned().collect();

    let mut stints = Vec::new();
    let mut pit_laps = Vec::new();
    let mut group_start = 0;
    let mut next_number = 1;

    for (index, lap) in filtered_laps.iter().enumerate() {
        if !threshold.is_pit_lap(lap.lap_time) {
            continue;
        }

        pit_laps.push(lap.lap_number);
        if let Some(stint) =
            close_stint(&filtered_laps[group_start..index], next_number, Some(lap.lap_time))
        {
            stints.push(stint);
            next_number += 1;
        }
        group_start = index + 1;
    }

    if let Some(stint) = close_stint(&filtered_laps[group_start..], next_number, None) {
        stints.push(stint);
    }

    debug!(
        laps = laps.len(),
        retained = filtered_laps.len(),
        excluded = laps.len() - filtered_laps.len(),
        pit_laps = pit_laps.len(),
        stints = stints.len(),
        threshold = threshold.seconds(),
        "Segmented stints"
    );

    StintAnalysis { stints, filtered_laps, pit_laps }
}

fn close_stint(group: &[LapRecord], stint_number: u32, pit_lap: Option<f64>) -> Option<StintRecord> {
    let summary = summarize(group)?;
    let (first, last) = (group.first()?, group.last()?);

    Some(StintRecord {
        stint_number,
        start_lap: first.lap_number,
        end_lap: last.lap_number,
        length_laps: summary.length,
        stint_time_minutes: summary.total_minutes,
        best_lap_seconds: summary.best_lap_seconds,
        median_lap_seconds: summary.median_lap_seconds,
        pit_stop_lap_seconds: pit_lap.map(|t| round_to(t, 3)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::laps_from_times;
    use proptest::prelude::*;

    fn no_exclusions() -> BTreeSet<u32> {
        BTreeSet::new()
    }

    #[test]
    fn pit_lap_splits_two_stints() {
        let laps = laps_from_times(&[70.0, 72.0, 68.0, 95.0, 71.0]);
        let analysis = segment(&laps, PitThreshold::default(), &no_exclusions());

        assert_eq!(analysis.stints.len(), 2);

        let first = &analysis.stints[0];
        assert_eq!((first.stint_number, first.start_lap, first.end_lap), (1, 1, 3));
        assert_eq!(first.length_laps, 3);
        assert_eq!(first.pit_stop_lap_seconds, Some(95.0));
        assert_eq!(first.best_lap_seconds, 68.0);
        assert_eq!(first.median_lap_seconds, 70.0);
        assert_eq!(first.stint_time_minutes, 3.50);

        let second = &analysis.stints[1];
        assert_eq!((second.stint_number, second.start_lap, second.end_lap), (2, 5, 5));
        assert_eq!(second.length_laps, 1);
        assert!(second.is_open());

        assert_eq!(analysis.pit_laps, vec![4]);
    }

    #[test]
    fn leading_pit_laps_emit_nothing() {
        let laps = laps_from_times(&[95.0, 96.0, 60.0, 62.0]);
        let analysis = segment(&laps, PitThreshold::default(), &no_exclusions());

        assert_eq!(analysis.stints.len(), 1);
        let stint = &analysis.stints[0];
        assert_eq!(stint.stint_number, 1);
        assert_eq!((stint.start_lap, stint.end_lap), (3, 4));
        assert_eq!(stint.pit_stop_lap_seconds, None);
    }

    #[test]
    fn back_to_back_pit_laps_do_not_consume_numbers() {
        let laps = laps_from_times(&[70.0, 90.0, 91.0, 70.0, 92.0]);
        let analysis = segment(&laps, PitThreshold::default(), &no_exclusions());

        let numbers: Vec<u32> = analysis.stints.iter().map(|s| s.stint_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(analysis.stints[0].pit_stop_lap_seconds, Some(90.0));
        assert_eq!(analysis.stints[1].pit_stop_lap_seconds, Some(92.0));
        assert!(analysis.open_stint().is_none());
    }

    #[test]
    fn lap_at_threshold_is_not_a_pit_lap() {
        let laps = laps_from_times(&[70.0, 80.0, 75.0]);
        let analysis = segment(&laps, PitThreshold::default(), &no_exclusions());
        assert_eq!(analysis.stints.len(), 1);
        assert_eq!(analysis.stints[0].length_laps, 3);
    }

    #[test]
    fn pit_stop_time_is_rounded() {
        let laps = laps_from_times(&[70.0, 95.12345, 71.0]);
        let analysis = segment(&laps, PitThreshold::default(), &no_exclusions());
        assert_eq!(analysis.stints[0].pit_stop_lap_seconds, Some(95.123));
    }

    #[test]
    fn excluding_a_pit_lap_merges_stints() {
        let laps = laps_from_times(&[70.0, 72.0, 68.0, 95.0, 71.0]);
        let excluded = BTreeSet::from([4]);
        let analysis = segment(&laps, PitThreshold::default(), &excluded);

        assert_eq!(analysis.stints.len(), 1);
        let stint = &analysis.stints[0];
        assert_eq!((stint.start_lap, stint.end_lap, stint.length_laps), (1, 5, 4));
        assert!(analysis.filtered_laps.iter().all(|l| l.lap_number != 4));
    }

    #[test]
    fn mid_stint_exclusion_keeps_bounds_and_shortens_length() {
        let laps = laps_from_times(&[70.0, 71.0, 72.0, 73.0, 95.0, 70.0]);
        let excluded = BTreeSet::from([2]);
        let analysis = segment(&laps, PitThreshold::default(), &excluded);

        let stint = &analysis.stints[0];
        assert_eq!((stint.start_lap, stint.end_lap), (1, 4));
        assert_eq!(stint.length_laps, 3);
        assert_eq!(analysis.filtered_laps.len(), 5);
    }

    #[test]
    fn boundary_exclusion_moves_bounds_to_retained_laps() {
        let laps = laps_from_times(&[70.0, 71.0, 72.0, 95.0]);
        let excluded = BTreeSet::from([1, 3]);
        let analysis = segment(&laps, PitThreshold::default(), &excluded);

        let stint = &analysis.stints[0];
        assert_eq!((stint.start_lap, stint.end_lap, stint.length_laps), (2, 2, 1));
    }

    #[test]
    fn excluding_unknown_laps_changes_nothing() {
        let laps = laps_from_times(&[70.0, 95.0, 71.0]);
        let plain = segment(&laps, PitThreshold::default(), &no_exclusions());
        let excluded = segment(&laps, PitThreshold::default(), &BTreeSet::from([42, 99]));
        assert_eq!(plain, excluded);
    }

    #[test]
    fn empty_input_has_no_stints() {
        let analysis = segment(&[], PitThreshold::default(), &no_exclusions());
        assert!(analysis.stints.is_empty());
        assert!(analysis.filtered_laps.is_empty());
    }

    fn arb_lap_times() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(
            prop_oneof![3 => 55.0f64..79.0, 1 => 81.0f64..200.0],
            0..80,
        )
    }

    proptest! {
        #[test]
        fn prop_every_lap_is_in_one_stint_or_a_pit_lap(
            times in arb_lap_times(),
            threshold in 10.0f64..=300.0,
            excluded in prop::collection::btree_set(1u32..90, 0..10),
        ) {
            let laps = laps_from_times(&times);
            let threshold = PitThreshold::new(threshold).unwrap();
            let analysis = segment(&laps, threshold, &excluded);

            let in_stints: usize = analysis.stints.iter().map(|s| s.length_laps).sum();
            prop_assert_eq!(in_stints + analysis.pit_laps.len(), analysis.filtered_laps.len());
            prop_assert!(analysis.filtered_laps.iter().all(|l| !excluded.contains(&l.lap_number)));
        }

        #[test]
        fn prop_no_pit_laps_gives_one_open_stint(
            times in prop::collection::vec(40.0f64..79.999, 1..60),
        ) {
            let laps = laps_from_times(&times);
            let analysis = segment(&laps, PitThreshold::default(), &BTreeSet::new());

            prop_assert_eq!(analysis.stints.len(), 1);
            let stint = &analysis.stints[0];
            prop_assert_eq!(stint.length_laps, times.len());
            prop_assert_eq!(stint.start_lap, 1);
            prop_assert_eq!(stint.end_lap, times.len() as u32);
            prop_assert!(stint.is_open());
        }

        #[test]
        fn prop_segmentation_is_deterministic(
            times in arb_lap_times(),
            excluded in prop::collection::btree_set(1u32..90, 0..10),
        ) {
            let laps = laps_from_times(&times);
            let first = segment(&laps, PitThreshold::default(), &excluded);
            let second = segment(&laps, PitThreshold::default(), &excluded);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_stint_numbers_are_gap_free_and_non_empty(
            times in arb_lap_times(),
            excluded in prop::collection::btree_set(1u32..90, 0..10),
        ) {
            let laps = laps_from_times(&times);
            let analysis = segment(&laps, PitThreshold::default(), &excluded);

            for (index, stint) in analysis.stints.iter().enumerate() {
                prop_assert_eq!(stint.stint_number, index as u32 + 1);
                prop_assert!(stint.length_laps >= 1);
                prop_assert!(stint.start_lap <= stint.end_lap);
            }
            // Only the last stint may be open
            let open = analysis.stints.iter().filter(|s| s.is_open()).count();
            prop_assert!(open <= 1);
            if open == 1 {
                prop_assert!(analysis.stints.last().unwrap().is_open());
            }
        }
    }
}
