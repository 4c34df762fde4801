//! Time step harvesting: which time steps a source offers for a well

use std::collections::BTreeSet;
use tracing::debug;

use crate::sources::{GridCase, WellLogFile};
use crate::types::{ChannelKind, DataSourceRef, TimeStamp};

/// Parameters shared by every harvest call of one query.
#[derive(Debug, Clone, Copy)]
pub struct HarvestOptions<'a> {
    /// RFT channels that count as data for RFT sources.
    pub rft_channels: &'a BTreeSet<ChannelKind>,
    /// Offer the first global report step of grid cases.
    pub include_first_report_step: bool,
}

/// Time steps at which `source` has data for `well`.
///
/// Only simulated RFT data is restricted to the requested channels; observed
/// RFT, summary RFT and ensemble data count every recorded time step.
/// Missing data gives an empty set.
pub fn harvest(source: &DataSourceRef, well: &str, options: HarvestOptions<'_>) -> BTreeSet<TimeStamp> {
    let steps = match source {
        DataSourceRef::ObservedLog(file) => observed_file_time_steps(file.as_ref()),
        DataSourceRef::ObservedRft(reader) => reader.all_time_steps(well),
        DataSourceRef::SummaryRft(reader) => reader.all_time_steps(well),
        DataSourceRef::Ensemble(ensemble) => ensemble.rft_time_steps(well),
        DataSourceRef::Rft(reader) => reader.available_time_steps(well, options.rft_channels),
        DataSourceRef::Grid(case) => {
            sim_well_time_steps(case.as_ref(), well, options.include_first_report_step)
        }
    };
    debug!(source = %source, well, count = steps.len(), "Harvested time steps");
    steps
}

/// The file's date, if it has a valid one.
pub fn observed_file_time_steps(file: &dyn WellLogFile) -> BTreeSet<TimeStamp> {
    file.date().into_iter().collect()
}

/// Global time steps at which the case has a simulated result for `well`.
///
/// With `include_first_report_step`, step 0 is offered as long as the case
/// knows the well, so rate and allocation plots can show the initial state.
pub fn sim_well_time_steps(
    case: &dyn GridCase,
    well: &str,
    include_first_report_step: bool,
) -> BTreeSet<TimeStamp> {
    if !case.has_dynamic_results() || !case.has_sim_well(well) {
        return BTreeSet::new();
    }

    case.dynamic_time_steps()
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            case.well_present_at_step(well, *index) || (include_first_report_step && *index == 0)
        })
        .map(|(_, time)| *time)
        .collect()
}
