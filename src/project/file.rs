//! TOML project file records
//!
//! ```toml
//! [[well_paths]]
//! name = "A-1H"
//! sim_well = "A1"
//!
//! [[well_paths.log_files]]
//! id = "A-1H_2020.las"
//! date = "2020-03-01"
//! channels = ["DEPTH", "PRESSURE"]
//!
//! [[grid_cases]]
//! id = "BASE"
//! time_steps = ["2020-01-01", "2020-03-01"]
//! results = ["PRESSURE"]
//! wells = { A1 = [0, 1] }
//!
//! [[grid_cases.rft]]
//! well = "A1"
//! time = "2020-03-01"
//! channels = ["PRESSURE"]
//!
//! [[observed_rft]]
//! id = "FMU_RFT"
//!
//! [[observed_rft.records]]
//! well = "A1"
//! time = "2020-02-15"
//! channels = ["PRESSURE"]
//!
//! [[summary_cases]]
//! id = "PRED-0"
//!
//! [[summary_cases.rft]]
//! well = "A1"
//! time = "2020-03-01"
//! channels = ["PRESSURE"]
//!
//! [[ensembles]]
//! id = "PRED"
//! members = ["PRED-0"]
//! ```
//!
//! Grid case time steps must be strictly ascending, since well step indices
//! refer to their position. Summary cases listed as ensemble members are only
//! reachable through their ensemble.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::{Project, ProjectError, WellPath};
use crate::sources::{MemoryEnsemble, MemoryGridCase, MemoryRftReader, MemoryWellLogFile};
use crate::types::{serde_timestamp, ChannelKind, TimeStamp};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProjectFile {
    #[serde(default)]
    well_paths: Vec<WellPathRecord>,
    #[serde(default)]
    grid_cases: Vec<GridCaseRecord>,
    #[serde(default)]
    observed_rft: Vec<ObservedRftRecord>,
    #[serde(default)]
    summary_cases: Vec<SummaryCaseRecord>,
    #[serde(default)]
    ensembles: Vec<EnsembleRecord>,
}

#[derive(Debug, Deserialize)]
struct WellPathRecord {
    name: String,
    #[serde(default)]
    sim_well: Option<String>,
    #[serde(default)]
    log_files: Vec<LogFileRecord>,
}

#[derive(Debug, Deserialize)]
struct LogFileRecord {
    id: String,
    #[serde(default, deserialize_with = "serde_timestamp::deserialize_option")]
    date: Option<TimeStamp>,
    #[serde(default)]
    channels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GridCaseRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "serde_timestamp::deserialize_vec")]
    time_steps: Vec<TimeStamp>,
    #[serde(default)]
    results: Vec<String>,
    /// Well name → step indices with simulated well results.
    #[serde(default)]
    wells: BTreeMap<String, Vec<usize>>,
    #[serde(default)]
    rft: Vec<RftRecord>,
}

#[derive(Debug, Deserialize)]
struct RftRecord {
    well: String,
    #[serde(deserialize_with = "serde_timestamp::deserialize")]
    time: TimeStamp,
    channels: Vec<ChannelKind>,
}

#[derive(Debug, Deserialize)]
struct ObservedRftRecord {
    id: String,
    #[serde(default)]
    records: Vec<RftRecord>,
}

#[derive(Debug, Deserialize)]
struct SummaryCaseRecord {
    id: String,
    #[serde(default)]
    rft: Vec<RftRecord>,
}

#[derive(Debug, Deserialize)]
struct EnsembleRecord {
    id: String,
    /// Summary case ids.
    #[serde(default)]
    members: Vec<String>,
}

/// Tracks ids already used within one kind of source.
struct IdRegistry {
    kind: &'static str,
    seen: BTreeSet<String>,
}

impl IdRegistry {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            seen: BTreeSet::new(),
        }
    }

    fn register(&mut self, id: &str) -> Result<(), ProjectError> {
        if self.seen.insert(id.to_string()) {
            Ok(())
        } else {
            Err(ProjectError::DuplicateSource {
                kind: self.kind,
                id: id.to_string(),
            })
        }
    }
}

fn rft_reader(id: &str, records: Vec<RftRecord>) -> MemoryRftReader {
    let mut reader = MemoryRftReader::new(id);
    for record in records {
        reader.add_record(record.well, record.time, record.channels);
    }
    reader
}

impl ProjectFile {
    pub(super) fn into_project(self) -> Result<Project, ProjectError> {
        let mut project = Project::new();

        let mut well_path_names = IdRegistry::new("well path");
        let mut log_file_ids = IdRegistry::new("well log file");
        for record in self.well_paths {
            well_path_names.register(&record.name)?;
            let mut well_path = WellPath::new(&record.name);
            if let Some(sim_well) = record.sim_well {
                well_path = well_path.with_sim_well_name(sim_well);
            }
            for file in record.log_files {
                log_file_ids.register(&file.id)?;
                let log_file = MemoryWellLogFile::new(file.id, &record.name)
                    .with_date(file.date)
                    .with_channels(file.channels);
                well_path = well_path.with_log_file(Arc::new(log_file));
            }
            project.add_well_path(well_path);
        }

        let mut case_ids = IdRegistry::new("grid case");
        for record in self.grid_cases {
            case_ids.register(&record.id)?;

            if let Some(index) = (1..record.time_steps.len())
                .find(|&i| record.time_steps[i] <= record.time_steps[i - 1])
            {
                return Err(ProjectError::UnsortedTimeSteps {
                    case: record.id,
                    index,
                });
            }

            let step_count = record.time_steps.len();
            let mut case = MemoryGridCase::new(&record.id).with_time_steps(record.time_steps);
            if let Some(name) = record.name {
                case = case.with_name(name);
            }
            for result in record.results {
                case = case.with_result(result);
            }
            for (well, indices) in record.wells {
                if let Some(&index) = indices.iter().find(|&&i| i >= step_count) {
                    return Err(ProjectError::InvalidStepIndex {
                        case: record.id,
                        well,
                        index,
                        steps: step_count,
                    });
                }
                case = case.with_well(well, indices);
            }
            if !record.rft.is_empty() {
                case = case.with_rft_reader(Arc::new(rft_reader(&record.id, record.rft)));
            }
            project.add_grid_case(Arc::new(case));
        }

        let mut observed_ids = IdRegistry::new("observed RFT");
        for record in self.observed_rft {
            observed_ids.register(&record.id)?;
            project.add_observed_rft(Arc::new(rft_reader(&record.id, record.records)));
        }

        let mut summary_ids = IdRegistry::new("summary case");
        let mut summary_cases = BTreeMap::new();
        let mut summary_order = Vec::new();
        for record in self.summary_cases {
            summary_ids.register(&record.id)?;
            summary_order.push(record.id.clone());
            summary_cases.insert(record.id.clone(), Arc::new(rft_reader(&record.id, record.rft)));
        }

        let mut ensemble_ids = IdRegistry::new("ensemble");
        let mut members_in_ensembles = BTreeSet::new();
        for record in self.ensembles {
            ensemble_ids.register(&record.id)?;
            let mut ensemble = MemoryEnsemble::new(&record.id);
            for member in record.members {
                let Some(case) = summary_cases.get(&member) else {
                    return Err(ProjectError::UnknownEnsembleMember {
                        ensemble: record.id,
                        member,
                    });
                };
                ensemble = ensemble.with_member(case.clone());
                members_in_ensembles.insert(member);
            }
            project.add_ensemble(Arc::new(ensemble));
        }

        for id in summary_order {
            if members_in_ensembles.contains(&id) {
                continue;
            }
            if let Some(case) = summary_cases.remove(&id) {
                project.add_summary_rft(case);
            }
        }

        Ok(project)
    }
}
