//! Project Catalog - well paths, log files, grid cases, RFT data and summary
//! ensembles of one project
//!
//! Answers "which sources exist for this well" for RFT and PLT plots, and
//! runs the time line and curve builders with the well's simulation well
//! name resolved.
//!
//! A well can be addressed by its well path name or by the simulation well
//! name associated with the well path. Grid and RFT data are keyed by the
//! simulation well name, log files belong to well paths.

mod file;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::channels;
use crate::config::FirstReportStepPolicy;
use crate::curves::curve_defs_from_time_steps;
use crate::sources::{GridCase, RftReader, SummaryEnsemble, WellLogFile};
use crate::timeline::aggregate;
use crate::types::{CurveDefinition, DataSourceRef, PlotKind, TimeStamp, TimeStepSourceMap};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read project file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateSource { kind: &'static str, id: String },

    #[error("Grid case '{case}': well '{well}' has step index {index}, but the case has {steps} time steps")]
    InvalidStepIndex {
        case: String,
        well: String,
        index: usize,
        steps: usize,
    },

    #[error("Grid case '{case}': time step {index} is not after the previous one")]
    UnsortedTimeSteps { case: String, index: usize },

    #[error("Ensemble '{ensemble}': unknown summary case '{member}'")]
    UnknownEnsembleMember { ensemble: String, member: String },
}

// ============================================================================
// Well path
// ============================================================================

/// A well path with its associated simulation well and observed log files.
#[derive(Clone, Default)]
pub struct WellPath {
    name: String,
    sim_well_name: Option<String>,
    log_files: Vec<Arc<dyn WellLogFile>>,
}

impl WellPath {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sim_well_name(mut self, sim_well_name: impl Into<String>) -> Self {
        self.sim_well_name = Some(sim_well_name.into());
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, file: Arc<dyn WellLogFile>) -> Self {
        self.log_files.push(file);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sim_well_name(&self) -> Option<&str> {
        self.sim_well_name.as_deref()
    }

    pub fn log_files(&self) -> &[Arc<dyn WellLogFile>] {
        &self.log_files
    }

    pub fn has_pressure_data(&self) -> bool {
        self.log_files.iter().any(|f| channels::has_pressure_data(f.as_ref()))
    }

    pub fn has_flow_data(&self) -> bool {
        self.log_files.iter().any(|f| channels::has_flow_data(f.as_ref()))
    }

    /// Whether `name` is this well path's name or its simulation well name.
    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.sim_well_name.as_deref() == Some(name)
    }
}

// ============================================================================
// Project
// ============================================================================

/// All well data sources of one project.
#[derive(Clone, Default)]
pub struct Project {
    well_paths: Vec<WellPath>,
    grid_cases: Vec<Arc<dyn GridCase>>,
    observed_rft: Vec<Arc<dyn RftReader>>,
    summary_rft: Vec<Arc<dyn RftReader>>,
    ensembles: Vec<Arc<dyn SummaryEnsemble>>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TOML project file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let project = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            well_paths = project.well_paths.len(),
            grid_cases = project.grid_cases.len(),
            observed_rft = project.observed_rft.len(),
            summary_cases = project.summary_rft.len(),
            ensembles = project.ensembles.len(),
            "Loaded project"
        );
        Ok(project)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ProjectError> {
        let records: file::ProjectFile = toml::from_str(contents)?;
        records.into_project()
    }

    pub fn add_well_path(&mut self, well_path: WellPath) {
        self.well_paths.push(well_path);
    }

    pub fn add_grid_case(&mut self, case: Arc<dyn GridCase>) {
        self.grid_cases.push(case);
    }

    pub fn add_observed_rft(&mut self, reader: Arc<dyn RftReader>) {
        self.observed_rft.push(reader);
    }

    /// Add the RFT data of a summary case that is not part of an ensemble.
    pub fn add_summary_rft(&mut self, reader: Arc<dyn RftReader>) {
        self.summary_rft.push(reader);
    }

    pub fn add_ensemble(&mut self, ensemble: Arc<dyn SummaryEnsemble>) {
        self.ensembles.push(ensemble);
    }

    pub fn well_paths(&self) -> &[WellPath] {
        &self.well_paths
    }

    pub fn grid_cases(&self) -> &[Arc<dyn GridCase>] {
        &self.grid_cases
    }

    // ========================================================================
    // Well name resolution
    // ========================================================================

    pub fn well_path_by_name(&self, name: &str) -> Option<&WellPath> {
        self.well_paths.iter().find(|w| w.name == name)
    }

    pub fn well_path_from_sim_well_name(&self, sim_well_name: &str) -> Option<&WellPath> {
        self.well_paths
            .iter()
            .find(|w| w.sim_well_name.as_deref() == Some(sim_well_name))
    }

    /// Well path by its own name first, then by simulation well name.
    pub fn well_path_by_name_or_sim_well_name(&self, name: &str) -> Option<&WellPath> {
        self.well_path_by_name(name)
            .or_else(|| self.well_path_from_sim_well_name(name))
    }

    /// Simulation well name for a well path name or simulation well name.
    ///
    /// Names without a well path, or whose well path has no associated
    /// simulation well, are returned unchanged.
    pub fn sim_well_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.well_path_by_name_or_sim_well_name(name)
            .and_then(WellPath::sim_well_name)
            .unwrap_or(name)
    }

    pub fn has_associated_well_path(&self, name: &str) -> bool {
        self.well_path_by_name(name).is_some()
    }

    /// Every well name known to the project: well paths and simulation wells.
    pub fn all_well_names(&self) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self.well_paths.iter().map(|w| w.name.clone()).collect();
        for case in &self.grid_cases {
            names.extend(case.sim_well_names());
            if let Some(reader) = case.rft_reader() {
                names.extend(reader.well_names());
            }
        }
        for reader in self.observed_rft.iter().chain(&self.summary_rft) {
            names.extend(reader.well_names());
        }
        for ensemble in &self.ensembles {
            for member in ensemble.members() {
                names.extend(member.well_names());
            }
        }
        names
    }

    // ========================================================================
    // Source queries
    // ========================================================================

    /// Grid cases with a simulation well of this name.
    pub fn grid_cases_for_well(&self, sim_well_name: &str) -> Vec<Arc<dyn GridCase>> {
        self.grid_cases
            .iter()
            .filter(|case| case.has_sim_well(sim_well_name))
            .cloned()
            .collect()
    }

    /// RFT readers of grid cases that have data for this simulation well.
    pub fn rft_readers_for_well(&self, sim_well_name: &str) -> Vec<Arc<dyn RftReader>> {
        self.grid_cases
            .iter()
            .filter_map(|case| case.rft_reader())
            .filter(|reader| reader.well_names().contains(sim_well_name))
            .collect()
    }

    pub fn observed_rft_for_well(&self, sim_well_name: &str) -> Vec<Arc<dyn RftReader>> {
        self.observed_rft
            .iter()
            .filter(|reader| reader.well_names().contains(sim_well_name))
            .cloned()
            .collect()
    }

    /// Summary cases outside ensembles with RFT data for this well.
    pub fn summary_rft_for_well(&self, well: &str) -> Vec<Arc<dyn RftReader>> {
        self.summary_rft
            .iter()
            .filter(|reader| reader.well_names().contains(well))
            .cloned()
            .collect()
    }

    /// Ensembles where any member has RFT data for this well.
    pub fn rft_ensembles_for_well(&self, well: &str) -> Vec<Arc<dyn SummaryEnsemble>> {
        self.ensembles
            .iter()
            .filter(|ensemble| ensemble.has_well(well))
            .cloned()
            .collect()
    }

    /// Log files with a pressure channel, from well paths matching `name`
    /// by well path name or simulation well name.
    pub fn well_log_files_containing_pressure(&self, name: &str) -> Vec<Arc<dyn WellLogFile>> {
        if name.is_empty() {
            return Vec::new();
        }
        self.well_paths
            .iter()
            .filter(|w| w.answers_to(name))
            .flat_map(|w| w.log_files.iter())
            .filter(|f| channels::has_pressure_data(f.as_ref()))
            .cloned()
            .collect()
    }

    /// Log files with a flow channel, from the well path named `well_path_name`.
    pub fn well_log_files_containing_flow(&self, well_path_name: &str) -> Vec<Arc<dyn WellLogFile>> {
        self.well_paths
            .iter()
            .filter(|w| w.name == well_path_name)
            .flat_map(|w| w.log_files.iter())
            .filter(|f| channels::has_flow_data(f.as_ref()))
            .cloned()
            .collect()
    }

    pub fn well_paths_containing_flow(&self) -> Vec<&WellPath> {
        self.well_paths.iter().filter(|w| w.has_flow_data()).collect()
    }

    pub fn well_paths_containing_pressure(&self) -> Vec<&WellPath> {
        self.well_paths.iter().filter(|w| w.has_pressure_data()).collect()
    }

    /// The well path owning `file`, matched by file id.
    pub fn well_path_for_log_file(&self, file: &dyn WellLogFile) -> Option<&WellPath> {
        self.well_paths
            .iter()
            .find(|w| w.log_files.iter().any(|f| f.id() == file.id()))
    }

    /// Selectable sources for a plot of `well`.
    ///
    /// Simulated RFT data first, then grid cases, then observed data: log
    /// files with pressure and observed RFT data for RFT plots, log files
    /// with flow for PLT plots. RFT plots also offer summary case RFT data
    /// and ensembles, between simulated RFT data and grid cases.
    pub fn sources_for_plot(&self, well: &str, plot: PlotKind) -> Vec<DataSourceRef> {
        let sim_well = self.sim_well_name(well);

        let mut sources: Vec<DataSourceRef> = self
            .rft_readers_for_well(sim_well)
            .into_iter()
            .map(DataSourceRef::Rft)
            .collect();
        if plot == PlotKind::Rft {
            sources.extend(
                self.summary_rft_for_well(sim_well)
                    .into_iter()
                    .map(DataSourceRef::SummaryRft),
            );
            sources.extend(
                self.rft_ensembles_for_well(sim_well)
                    .into_iter()
                    .map(DataSourceRef::Ensemble),
            );
        }
        sources.extend(self.grid_cases_for_well(sim_well).into_iter().map(DataSourceRef::Grid));

        match plot {
            PlotKind::Rft => {
                sources.extend(
                    self.well_log_files_containing_pressure(well)
                        .into_iter()
                        .map(DataSourceRef::ObservedLog),
                );
                sources.extend(
                    self.observed_rft_for_well(sim_well)
                        .into_iter()
                        .map(DataSourceRef::ObservedRft),
                );
            }
            PlotKind::Plt => {
                if let Some(well_path) = self.well_path_by_name_or_sim_well_name(well) {
                    sources.extend(
                        self.well_log_files_containing_flow(well_path.name())
                            .into_iter()
                            .map(DataSourceRef::ObservedLog),
                    );
                }
            }
        }

        debug!(well, sim_well, plot = ?plot, count = sources.len(), "Collected plot sources");
        sources
    }

    // ========================================================================
    // Time line
    // ========================================================================

    /// Aggregated time steps of `selected_sources` for a plot of `well`.
    pub fn time_steps_for_plot(
        &self,
        well: &str,
        plot: PlotKind,
        selected_sources: &[DataSourceRef],
        policy: FirstReportStepPolicy,
    ) -> TimeStepSourceMap {
        let channel_kinds = plot.channel_kinds();
        let include_first = policy.resolve(&channel_kinds);
        aggregate(self.sim_well_name(well), selected_sources, &channel_kinds, include_first)
    }

    /// Curve definitions for the selected time steps of a plot of `well`.
    pub fn curve_defs_for_plot(
        &self,
        well: &str,
        plot: PlotKind,
        selected_time_steps: &BTreeSet<TimeStamp>,
        sources_to_expand: &[DataSourceRef],
        policy: FirstReportStepPolicy,
    ) -> BTreeSet<CurveDefinition> {
        let channel_kinds = plot.channel_kinds();
        let include_first = policy.resolve(&channel_kinds);
        curve_defs_from_time_steps(
            self.sim_well_name(well),
            selected_time_steps,
            sources_to_expand,
            &channel_kinds,
            include_first,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
