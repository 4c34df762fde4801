//! Well plot tools: time steps and curve definitions for RFT and PLT plots
//!
//! Collects the time steps at which observed logs, simulated RFT data and
//! grid cases have data for a well, reconciles them against one baseline
//! time line, and turns the user's selection into curve definitions.
//!
//! ## Architecture
//!
//! - **Channel classifier** (`channels`): channel names → flow phase / pressure
//! - **Time line** (`timeline`): per-source harvesting, match-or-adjacent
//!   reconciliation, aggregation into a time step → sources map
//! - **Curve definitions** (`curves`): selected time steps → curves to plot
//! - **Options** (`options`): labeled time step lists for selection widgets
//! - **Project** (`project`): source catalog loaded from TOML, per-well queries
//! - **Units** (`units`): flow axis titles and unit texts

pub mod channels;
pub mod config;
pub mod curves;
pub mod options;
pub mod project;
pub mod sources;
pub mod timeline;
pub mod types;
pub mod units;

// Re-export configuration
pub use config::{FirstReportStepPolicy, PlotToolsConfig};

// Re-export commonly used types
pub use types::{
    ChannelKind, CurveDefinition, DataSourceKind, DataSourceRef, FlowPhase, PlotCurve, PlotKind,
    SourceId, TimeStamp, TimeStepSourceMap,
};

// Re-export collaborator interfaces
pub use sources::{GridCase, RftReader, WellLogFile};

// Re-export the core operations
pub use channels::{classify, is_pressure_channel};
pub use curves::{curve_def_from_curve, curve_defs_from_time_steps};
pub use options::{format_time_step_options, time_step_options, TimeStepOption};
pub use project::{Project, ProjectError, WellPath};
pub use timeline::{aggregate, harvest, reconcile};
