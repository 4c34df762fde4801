//! Time Line Property Tests
//!
//! Match-or-adjacent reconciliation and source aggregation exercised through
//! the public API with in-memory collaborators.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Duration;
use wellplot_tools::sources::{MemoryGridCase, MemoryRftReader, MemoryWellLogFile};
use wellplot_tools::types::parse_timestamp;
use wellplot_tools::{
    aggregate, classify, curve_defs_from_time_steps, is_pressure_channel, reconcile,
    time_step_options, ChannelKind, DataSourceKind, DataSourceRef, FlowPhase, TimeStamp,
};

fn ts(text: &str) -> TimeStamp {
    parse_timestamp(text).unwrap()
}

fn day(offset: i64) -> TimeStamp {
    ts("2020-03-01") + Duration::days(offset)
}

fn days(offsets: &[i64]) -> BTreeSet<TimeStamp> {
    offsets.iter().map(|&o| day(o)).collect()
}

// ============================================================================
// Reconciliation
// ============================================================================

#[test]
fn empty_inputs_reconcile_to_nothing() {
    let candidates = days(&[-2, 0, 5]);
    assert!(reconcile(&BTreeSet::new(), &candidates).is_empty());
    assert!(reconcile(&candidates, &BTreeSet::new()).is_empty());
}

#[test]
fn exact_matches_are_always_kept() {
    let baseline = days(&[0, 10, 20]);
    let candidates = days(&[-5, 0, 3, 10, 15, 20, 40]);
    let result = reconcile(&baseline, &candidates);
    assert!(baseline.iter().all(|t| result.contains(t)));
}

#[test]
fn next_candidate_comes_with_its_predecessor() {
    let result = reconcile(&days(&[0]), &days(&[-2, -1, 1]));
    assert_eq!(result, days(&[-1, 1]));
}

#[test]
fn exact_match_adds_no_predecessor() {
    assert_eq!(reconcile(&days(&[0]), &days(&[-1, 0])), days(&[0]));
}

#[test]
fn all_candidates_before_baseline_fall_back_to_latest() {
    assert_eq!(reconcile(&days(&[0]), &days(&[-3, -2, -1])), days(&[-1]));
}

#[test]
fn first_candidate_after_baseline_has_no_predecessor() {
    assert_eq!(reconcile(&days(&[0]), &days(&[2, 4])), days(&[2]));
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn observed_log_and_grid_case_end_to_end() {
    let log: DataSourceRef = DataSourceRef::ObservedLog(Arc::new(
        MemoryWellLogFile::new("W1.las", "W1").with_date(Some(ts("2020-03-01"))),
    ));
    let grid = DataSourceRef::Grid(Arc::new(
        MemoryGridCase::new("BASE")
            .with_time_steps([ts("2020-01-01"), ts("2020-03-01"), ts("2020-06-01")])
            .with_well_at_all_steps("W1"),
    ));

    let map = aggregate(
        "W1",
        &[log, grid],
        &BTreeSet::from([ChannelKind::Pressure]),
        false,
    );

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.kinds_at(&ts("2020-03-01")),
        BTreeSet::from([DataSourceKind::Observed, DataSourceKind::Grid])
    );

    let options = time_step_options(&map);
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "01.03.2020  [ O G ]");
    assert_eq!(options[0].value, ts("2020-03-01"));
}

#[test]
fn aggregated_entries_are_never_empty() {
    let reader = MemoryRftReader::new("RFT")
        .with_record("W1", day(3), [ChannelKind::Pressure])
        .with_record("W1", day(9), [ChannelKind::Swat]);
    let grid = MemoryGridCase::new("BASE")
        .with_time_steps([day(0), day(5), day(10)])
        .with_well("W1", [0, 2]);
    let sources = vec![
        DataSourceRef::Rft(Arc::new(reader)),
        DataSourceRef::Grid(Arc::new(grid)),
    ];

    let map = aggregate("W1", &sources, &BTreeSet::from([ChannelKind::Pressure]), true);

    assert!(map.iter().all(|(_, sources)| !sources.is_empty()));
    // RFT baseline {day 3}: grid steps 0 and 10 are the neighbors, 0 is also forced in.
    let keys: Vec<_> = map.iter().map(|(t, _)| *t).collect();
    assert_eq!(keys, vec![day(0), day(3), day(10)]);
}

#[test]
fn curve_definitions_collapse_duplicates() {
    let case = Arc::new(
        MemoryGridCase::new("BASE")
            .with_time_steps([day(0), day(5)])
            .with_well_at_all_steps("W1"),
    );
    let sources = vec![
        DataSourceRef::Grid(case.clone()),
        DataSourceRef::Grid(case),
    ];

    let defs = curve_defs_from_time_steps(
        "W1",
        &days(&[0, 5]),
        &sources,
        &ChannelKind::RATES.into_iter().collect(),
        false,
    );

    assert_eq!(defs.len(), 2);
}

// ============================================================================
// Channel classification
// ============================================================================

#[test]
fn channel_names_classify_by_phase() {
    assert_eq!(classify("A1_QOIL"), FlowPhase::Oil);
    assert_eq!(classify("QGAS"), FlowPhase::Gas);
    assert_eq!(classify("RANDOM"), FlowPhase::None);
    assert!(is_pressure_channel("Pressure"));
    assert!(is_pressure_channel("PRES_FORM"));
    assert!(!is_pressure_channel("PRESSURE_2"));
}
