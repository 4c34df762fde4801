//! Curve definitions: one curve per (source, well, time step)

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

use super::{DataSourceRef, TimeStamp};
use crate::sources::{GridCase, WellLogFile};

/// Identifies a single plot curve.
///
/// Ordered by time step, then source, then well name, so sets of
/// definitions iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurveDefinition {
    source: DataSourceRef,
    well_name: String,
    time_step: TimeStamp,
}

impl CurveDefinition {
    pub fn new(source: DataSourceRef, well_name: impl Into<String>, time_step: TimeStamp) -> Self {
        Self {
            source,
            well_name: well_name.into(),
            time_step,
        }
    }

    pub fn source(&self) -> &DataSourceRef {
        &self.source
    }

    pub fn well_name(&self) -> &str {
        &self.well_name
    }

    pub fn time_step(&self) -> TimeStamp {
        self.time_step
    }
}

impl PartialOrd for CurveDefinition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CurveDefinition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_step
            .cmp(&other.time_step)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.well_name.cmp(&other.well_name))
    }
}

/// Flat, serializable view of a [`CurveDefinition`].
#[derive(Debug, Clone, Serialize)]
pub struct CurveDefinitionSummary {
    pub kind: super::DataSourceKind,
    pub source_id: String,
    pub well_name: String,
    pub time_step: TimeStamp,
}

impl From<&CurveDefinition> for CurveDefinitionSummary {
    fn from(def: &CurveDefinition) -> Self {
        Self {
            kind: def.source.kind(),
            source_id: def.source.id().to_string(),
            well_name: def.well_name.clone(),
            time_step: def.time_step,
        }
    }
}

/// A curve already present in a plot.
pub enum PlotCurve {
    /// RFT curve addressed by well and time step.
    Rft {
        source: DataSourceRef,
        well_name: String,
        time_step: TimeStamp,
    },
    /// Curve extracted from grid cell results at a time step index.
    GridExtraction {
        case: Arc<dyn GridCase>,
        well_name: String,
        time_step_index: usize,
    },
    /// Curve read from an observed well log file.
    WellLog { file: Arc<dyn WellLogFile> },
}
