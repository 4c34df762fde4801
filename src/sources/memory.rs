//! In-memory collaborators built from project files or in code

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::{GridCase, RftReader, SummaryEnsemble, WellLogFile};
use crate::types::{ChannelKind, SourceId, TimeStamp};

// ============================================================================
// Grid case
// ============================================================================

/// Grid case with pre-loaded time steps, result names and well presence.
#[derive(Debug, Clone, Default)]
pub struct MemoryGridCase {
    id: SourceId,
    name: Option<String>,
    time_steps: Vec<TimeStamp>,
    results: BTreeSet<String>,
    /// Well name → step indices with a simulated well result.
    wells: BTreeMap<String, BTreeSet<usize>>,
    rft_reader: Option<Arc<MemoryRftReader>>,
}

impl MemoryGridCase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: SourceId::new(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the global time steps; they are sorted ascending.
    #[must_use]
    pub fn with_time_steps(mut self, steps: impl IntoIterator<Item = TimeStamp>) -> Self {
        self.time_steps = steps.into_iter().collect();
        self.time_steps.sort_unstable();
        self
    }

    #[must_use]
    pub fn with_result(mut self, result_name: impl Into<String>) -> Self {
        self.results.insert(result_name.into());
        self
    }

    /// Register `well` with results at the given step indices.
    #[must_use]
    pub fn with_well(
        mut self,
        well: impl Into<String>,
        step_indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.wells
            .entry(well.into())
            .or_default()
            .extend(step_indices);
        self
    }

    /// Register `well` with results at every current time step.
    #[must_use]
    pub fn with_well_at_all_steps(self, well: impl Into<String>) -> Self {
        let steps = 0..self.time_steps.len();
        self.with_well(well, steps)
    }

    #[must_use]
    pub fn with_rft_reader(mut self, reader: Arc<MemoryRftReader>) -> Self {
        self.rft_reader = Some(reader);
        self
    }

    /// Largest registered step index, if any well has results.
    pub fn max_step_index(&self) -> Option<usize> {
        self.wells.values().filter_map(|s| s.last().copied()).max()
    }
}

impl GridCase for MemoryGridCase {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }

    fn dynamic_time_steps(&self) -> &[TimeStamp] {
        &self.time_steps
    }

    fn sim_well_names(&self) -> BTreeSet<String> {
        self.wells.keys().cloned().collect()
    }

    fn has_sim_well(&self, well: &str) -> bool {
        self.wells.contains_key(well)
    }

    fn well_present_at_step(&self, well: &str, step_index: usize) -> bool {
        self.wells
            .get(well)
            .is_some_and(|steps| steps.contains(&step_index))
    }

    fn has_result(&self, result_name: &str) -> bool {
        self.results.contains(result_name)
    }

    fn rft_reader(&self) -> Option<Arc<dyn RftReader>> {
        self.rft_reader
            .clone()
            .map(|reader| reader as Arc<dyn RftReader>)
    }
}

// ============================================================================
// RFT reader
// ============================================================================

/// RFT reader over in-memory (well, time, channels) records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRftReader {
    id: SourceId,
    records: BTreeMap<String, BTreeMap<TimeStamp, BTreeSet<ChannelKind>>>,
}

impl MemoryRftReader {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: SourceId::new(id),
            records: BTreeMap::new(),
        }
    }

    /// Record that `well` has the given channels at `time`.
    #[must_use]
    pub fn with_record(
        mut self,
        well: impl Into<String>,
        time: TimeStamp,
        channels: impl IntoIterator<Item = ChannelKind>,
    ) -> Self {
        self.add_record(well, time, channels);
        self
    }

    pub fn add_record(
        &mut self,
        well: impl Into<String>,
        time: TimeStamp,
        channels: impl IntoIterator<Item = ChannelKind>,
    ) {
        self.records
            .entry(well.into())
            .or_default()
            .entry(time)
            .or_default()
            .extend(channels);
    }
}

impl RftReader for MemoryRftReader {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn well_names(&self) -> BTreeSet<String> {
        self.records.keys().cloned().collect()
    }

    fn available_time_steps(
        &self,
        well: &str,
        channels: &BTreeSet<ChannelKind>,
    ) -> BTreeSet<TimeStamp> {
        self.records
            .get(well)
            .map(|times| {
                times
                    .iter()
                    .filter(|(_, recorded)| !recorded.is_disjoint(channels))
                    .map(|(time, _)| *time)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn all_time_steps(&self, well: &str) -> BTreeSet<TimeStamp> {
        self.records
            .get(well)
            .map(|times| times.keys().copied().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Summary ensemble
// ============================================================================

/// Ensemble of summary cases given by their RFT readers.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnsemble {
    id: SourceId,
    members: Vec<Arc<MemoryRftReader>>,
}

impl MemoryEnsemble {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: SourceId::new(id),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: Arc<MemoryRftReader>) -> Self {
        self.members.push(member);
        self
    }
}

impl SummaryEnsemble for MemoryEnsemble {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn members(&self) -> Vec<Arc<dyn RftReader>> {
        self.members
            .iter()
            .map(|member| member.clone() as Arc<dyn RftReader>)
            .collect()
    }
}

// ============================================================================
// Well log file
// ============================================================================

/// Observed LAS/CSV file: a date and a list of channel names.
#[derive(Debug, Clone, Default)]
pub struct MemoryWellLogFile {
    id: SourceId,
    well_name: String,
    date: Option<TimeStamp>,
    channels: Vec<String>,
}

impl MemoryWellLogFile {
    pub fn new(id: impl Into<String>, well_name: impl Into<String>) -> Self {
        Self {
            id: SourceId::new(id),
            well_name: well_name.into(),
            date: None,
            channels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: Option<TimeStamp>) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn with_channels<S: Into<String>>(mut self, channels: impl IntoIterator<Item = S>) -> Self {
        self.channels.extend(channels.into_iter().map(Into::into));
        self
    }
}

impl WellLogFile for MemoryWellLogFile {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn well_name(&self) -> &str {
        &self.well_name
    }

    fn date(&self) -> Option<TimeStamp> {
        self.date
    }

    fn channels(&self) -> &[String] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp;

    fn ts(text: &str) -> TimeStamp {
        parse_timestamp(text).unwrap()
    }

    #[test]
    fn test_grid_case_well_presence() {
        let case = MemoryGridCase::new("BASE")
            .with_time_steps([ts("2020-06-01"), ts("2020-01-01")])
            .with_well("W1", [1]);

        assert_eq!(case.dynamic_time_steps()[0], ts("2020-01-01"));
        assert!(case.has_sim_well("W1"));
        assert!(!case.has_sim_well("W2"));
        assert_eq!(case.sim_well_names(), BTreeSet::from(["W1".to_string()]));
        assert!(case.well_present_at_step("W1", 1));
        assert!(!case.well_present_at_step("W1", 0));
        assert_eq!(case.max_step_index(), Some(1));
        assert_eq!(case.name(), "BASE");
    }

    #[test]
    fn test_result_time_steps_require_result() {
        let case = MemoryGridCase::new("BASE")
            .with_time_steps([ts("2020-01-01")])
            .with_result("PRESSURE");
        assert_eq!(case.result_time_steps("PRESSURE"), vec![ts("2020-01-01")]);
        assert!(case.result_time_steps("SWAT").is_empty());
    }

    #[test]
    fn test_rft_reader_filters_by_channel() {
        let reader = MemoryRftReader::new("RFT")
            .with_record("W1", ts("2020-01-01"), [ChannelKind::Pressure])
            .with_record("W1", ts("2020-02-01"), [ChannelKind::Orat, ChannelKind::Wrat]);

        let pressure = BTreeSet::from([ChannelKind::Pressure]);
        assert_eq!(
            reader.available_time_steps("W1", &pressure),
            BTreeSet::from([ts("2020-01-01")])
        );
        assert_eq!(reader.all_time_steps("W1").len(), 2);
        assert!(reader.all_time_steps("W2").is_empty());
        assert_eq!(reader.well_names(), BTreeSet::from(["W1".to_string()]));
    }

    #[test]
    fn test_ensemble_time_steps_are_union_of_members() {
        let a = MemoryRftReader::new("REAL-0").with_record("W1", ts("2020-01-01"), [ChannelKind::Pressure]);
        let b = MemoryRftReader::new("REAL-1")
            .with_record("W1", ts("2020-01-01"), [ChannelKind::Pressure])
            .with_record("W1", ts("2020-05-01"), [ChannelKind::Swat]);
        let ensemble = MemoryEnsemble::new("ENS")
            .with_member(Arc::new(a))
            .with_member(Arc::new(b));

        assert_eq!(ensemble.members().len(), 2);
        assert_eq!(
            ensemble.rft_time_steps("W1"),
            BTreeSet::from([ts("2020-01-01"), ts("2020-05-01")])
        );
        assert!(ensemble.has_well("W1"));
        assert!(!ensemble.has_well("W2"));
    }
}
