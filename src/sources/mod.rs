//! Collaborator interfaces for grid cases, RFT readers, summary ensembles
//! and well log files
//!
//! The timeline code only queries these traits. Implementations own the
//! loaded simulation/LAS data; handles are shared as `Arc<dyn ...>` and
//! must be safe to query from any thread.

mod memory;

pub use memory::*;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::types::{ChannelKind, SourceId, TimeStamp};

/// A simulation case with dynamic grid results.
pub trait GridCase: Send + Sync {
    fn id(&self) -> &SourceId;

    /// Display name; defaults to the id.
    fn name(&self) -> &str {
        self.id().as_str()
    }

    /// False when the case has no loaded dynamic results.
    fn has_dynamic_results(&self) -> bool {
        !self.dynamic_time_steps().is_empty()
    }

    /// Global report time steps, ascending by step index.
    fn dynamic_time_steps(&self) -> &[TimeStamp];

    /// Names of the simulation wells in the case.
    fn sim_well_names(&self) -> BTreeSet<String>;

    /// Whether the case knows a simulation well with this name.
    fn has_sim_well(&self, well: &str) -> bool {
        self.sim_well_names().contains(well)
    }

    /// Whether `well` has a simulated well result at `step_index`.
    fn well_present_at_step(&self, well: &str, step_index: usize) -> bool;

    /// Whether a dynamic cell result with this name exists.
    fn has_result(&self, result_name: &str) -> bool;

    /// Time steps at which `result_name` has values.
    fn result_time_steps(&self, result_name: &str) -> Vec<TimeStamp> {
        if self.has_result(result_name) {
            self.dynamic_time_steps().to_vec()
        } else {
            Vec::new()
        }
    }

    /// RFT reader attached to the case, if the case has RFT output.
    fn rft_reader(&self) -> Option<Arc<dyn RftReader>> {
        None
    }
}

/// Reader for RFT/PLT data (simulated or observed).
pub trait RftReader: Send + Sync {
    fn id(&self) -> &SourceId;

    fn well_names(&self) -> BTreeSet<String>;

    /// Time steps at which `well` has data in any of `channels`.
    fn available_time_steps(&self, well: &str, channels: &BTreeSet<ChannelKind>)
        -> BTreeSet<TimeStamp>;

    /// Time steps at which `well` has data in any channel.
    fn all_time_steps(&self, well: &str) -> BTreeSet<TimeStamp>;
}

/// An observed LAS/CSV well log file.
pub trait WellLogFile: Send + Sync {
    fn id(&self) -> &SourceId;

    fn well_name(&self) -> &str;

    /// Measurement date; `None` when the file carries no valid date.
    fn date(&self) -> Option<TimeStamp>;

    fn channels(&self) -> &[String];
}

/// An ensemble of summary cases, each with its own RFT data.
pub trait SummaryEnsemble: Send + Sync {
    fn id(&self) -> &SourceId;

    /// RFT readers of the member summary cases.
    fn members(&self) -> Vec<Arc<dyn RftReader>>;

    /// Time steps at which any member has data for `well`.
    fn rft_time_steps(&self, well: &str) -> BTreeSet<TimeStamp> {
        self.members()
            .iter()
            .flat_map(|member| member.all_time_steps(well))
            .collect()
    }

    fn has_well(&self, well: &str) -> bool {
        !self.rft_time_steps(well).is_empty()
    }
}
