//! Source aggregation: one time step → sources map for a well

use std::collections::BTreeSet;
use tracing::debug;

use super::harvest::{harvest, HarvestOptions};
use super::reconcile::reconcile;
use crate::types::{ChannelKind, DataSourceKind, DataSourceRef, TimeStamp, TimeStepSourceMap};

/// Collect the time steps to offer for `well` across the selected sources.
///
/// The baseline time line is the first of observed, RFT, summary RFT and
/// ensemble time steps that is not empty. RFT, summary RFT, ensemble and
/// grid time steps are reconciled against it and merged into the observed
/// entries. Without a baseline the grid time steps are returned unfiltered.
///
/// With `include_first_report_step`, the earliest grid time step is always
/// kept, whatever the reconciliation decides.
pub fn aggregate(
    well: &str,
    selected_sources: &[DataSourceRef],
    rft_channels: &BTreeSet<ChannelKind>,
    include_first_report_step: bool,
) -> TimeStepSourceMap {
    let options = HarvestOptions {
        rft_channels,
        include_first_report_step,
    };
    let by_kind = |kind| harvest_kind(well, selected_sources, kind, options);

    let observed = by_kind(DataSourceKind::Observed);
    let rft = by_kind(DataSourceKind::Rft);
    let summary_rft = by_kind(DataSourceKind::SummaryRft);
    let ensemble = by_kind(DataSourceKind::Ensemble);
    let grid = by_kind(DataSourceKind::Grid);

    debug!(
        well,
        observed = observed.len(),
        rft = rft.len(),
        summary_rft = summary_rft.len(),
        ensemble = ensemble.len(),
        grid = grid.len(),
        "Harvested time steps per source kind"
    );

    // Selected kinds that offered nothing fall through to the next one.
    let Some(baseline) = [&observed, &rft, &summary_rft, &ensemble]
        .into_iter()
        .find(|map| !map.is_empty())
        .map(TimeStepSourceMap::time_steps)
    else {
        return grid;
    };

    let mut filtered_grid = reconcile(&baseline, &grid.time_steps());
    if include_first_report_step {
        if let Some(first) = grid.first_time_step() {
            filtered_grid.insert(first);
        }
    }

    let reconciled = [
        (&rft, reconcile(&baseline, &rft.time_steps())),
        (&summary_rft, reconcile(&baseline, &summary_rft.time_steps())),
        (&ensemble, reconcile(&baseline, &ensemble.time_steps())),
        (&grid, filtered_grid),
    ];
    let all_filtered: BTreeSet<TimeStamp> = reconciled
        .iter()
        .flat_map(|(_, times)| times.iter().copied())
        .collect();

    let mut result = observed;
    for time in &all_filtered {
        for (map, _) in &reconciled {
            if let Some(sources) = map.get(time) {
                result.extend_at(*time, sources.iter().cloned());
            }
        }
    }

    debug!(well, time_steps = result.len(), "Aggregated time steps");
    result
}

/// Harvest every selected source of one kind into a single map.
fn harvest_kind(
    well: &str,
    sources: &[DataSourceRef],
    kind: DataSourceKind,
    options: HarvestOptions<'_>,
) -> TimeStepSourceMap {
    let mut map = TimeStepSourceMap::new();
    for source in sources.iter().filter(|s| s.kind() == kind) {
        for time in harvest(source, well, options) {
            map.insert(time, source.clone());
        }
    }
    map
}
