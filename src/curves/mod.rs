//! Curve definitions from selected time steps and existing plot curves

use std::collections::BTreeSet;
use tracing::debug;

use crate::channels;
use crate::timeline::{harvest, HarvestOptions};
use crate::types::{ChannelKind, CurveDefinition, DataSourceRef, PlotCurve, TimeStamp};

/// One curve definition per (source, time step) the user selected.
///
/// Each source is harvested the same way as during aggregation and only the
/// time steps in `selected_time_steps` are kept. An ensemble also expands
/// into one summary RFT curve per member next to its own statistics curve.
/// Duplicates collapse.
pub fn curve_defs_from_time_steps(
    well: &str,
    selected_time_steps: &BTreeSet<TimeStamp>,
    sources_to_expand: &[DataSourceRef],
    rft_channels: &BTreeSet<ChannelKind>,
    include_first_report_step: bool,
) -> BTreeSet<CurveDefinition> {
    let options = HarvestOptions {
        rft_channels,
        include_first_report_step,
    };

    let mut curve_defs = BTreeSet::new();
    let mut expand = |source: &DataSourceRef| {
        let available = harvest(source, well, options);
        for time in available.intersection(selected_time_steps) {
            curve_defs.insert(CurveDefinition::new(source.clone(), well, *time));
        }
    };

    for source in sources_to_expand {
        if let DataSourceRef::Ensemble(ensemble) = source {
            for member in ensemble.members() {
                expand(&DataSourceRef::SummaryRft(member));
            }
        }
        expand(source);
    }

    debug!(
        well,
        selected = selected_time_steps.len(),
        curves = curve_defs.len(),
        "Built curve definitions"
    );
    curve_defs
}

/// Recover the curve definition of a curve already in a plot.
///
/// Grid extraction curves index into the case's pressure result time steps;
/// well log curves need a dated file.
pub fn curve_def_from_curve(curve: &PlotCurve) -> Option<CurveDefinition> {
    match curve {
        PlotCurve::Rft {
            source,
            well_name,
            time_step,
        } => Some(CurveDefinition::new(source.clone(), well_name.clone(), *time_step)),
        PlotCurve::GridExtraction {
            case,
            well_name,
            time_step_index,
        } => {
            let result_name = channels::pressure_result_name(case.as_ref())?;
            let steps: BTreeSet<TimeStamp> =
                case.result_time_steps(result_name).into_iter().collect();
            let time = steps.into_iter().nth(*time_step_index)?;
            Some(CurveDefinition::new(
                DataSourceRef::Grid(case.clone()),
                well_name.clone(),
                time,
            ))
        }
        PlotCurve::WellLog { file } => {
            let date = file.date()?;
            Some(CurveDefinition::new(
                DataSourceRef::ObservedLog(file.clone()),
                file.well_name(),
                date,
            ))
        }
    }
}
