//! Time step report for one well of a project.
//!
//! Loads a TOML project file, collects the sources of an RFT or PLT plot for
//! the well, and prints the reconciled time step options. With `--select`,
//! also prints the curve definitions those time steps expand to.
//!
//! Usage:
//!   cargo run --bin timestep-report -- --project field.toml --list-wells
//!   cargo run --bin timestep-report -- --project field.toml --well A-1H --plot rft
//!   cargo run --bin timestep-report -- --project field.toml --well A-1H --plot plt \
//!       --select 2020-06-01 --json

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use wellplot_tools::config::{self, PlotToolsConfig};
use wellplot_tools::types::{parse_timestamp, CurveDefinitionSummary, DataSourceKind};
use wellplot_tools::units::{flow_plot_axis_title, FlowCondition, UnitSystem};
use wellplot_tools::{time_step_options, DataSourceRef, PlotKind, Project, TimeStepOption};

/// Reconciled RFT/PLT time steps for a well.
#[derive(Parser, Debug)]
#[command(name = "timestep-report")]
#[command(version)]
struct Args {
    /// Project file (TOML).
    #[arg(long, env = "WELLPLOT_PROJECT")]
    project: PathBuf,

    /// Config file; defaults to $WELLPLOT_CONFIG, then ./wellplot.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Well path name or simulation well name.
    #[arg(long)]
    well: Option<String>,

    /// Plot family.
    #[arg(long, value_enum, default_value = "rft")]
    plot: PlotArg,

    /// Only use sources with these ids (repeatable).
    #[arg(long = "source", value_name = "ID")]
    sources: Vec<String>,

    /// Build curve definitions for these time steps (repeatable).
    #[arg(long = "select", value_name = "TIME")]
    select: Vec<String>,

    /// Unit system for the PLT axis title.
    #[arg(long, value_enum, default_value = "metric")]
    units: UnitArg,

    /// List the wells in the project and exit.
    #[arg(long)]
    list_wells: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlotArg {
    Rft,
    Plt,
}

impl From<PlotArg> for PlotKind {
    fn from(arg: PlotArg) -> Self {
        match arg {
            PlotArg::Rft => Self::Rft,
            PlotArg::Plt => Self::Plt,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Metric,
    Field,
    Lab,
}

impl From<UnitArg> for UnitSystem {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Metric => Self::Metric,
            UnitArg::Field => Self::Field,
            UnitArg::Lab => Self::Lab,
        }
    }
}

#[derive(Debug, Serialize)]
struct SourceSummary {
    kind: DataSourceKind,
    id: String,
}

#[derive(Debug, Serialize)]
struct Report {
    well: String,
    sim_well: String,
    plot: PlotKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis_title: Option<String>,
    sources: Vec<SourceSummary>,
    time_steps: Vec<TimeStepOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    curves: Vec<CurveDefinitionSummary>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let plot_config = match &args.config {
        Some(path) => PlotToolsConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlotToolsConfig::load(),
    };
    config::init(plot_config);

    let project = Project::load(&args.project)
        .with_context(|| format!("Failed to load project {}", args.project.display()))?;

    if args.list_wells {
        let wells = project.all_well_names();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&wells)?);
        } else {
            for well in wells {
                println!("{well}");
            }
        }
        return Ok(());
    }

    let Some(well) = args.well.as_deref() else {
        bail!("--well is required unless --list-wells is given");
    };
    let plot = PlotKind::from(args.plot);
    let policy = config::first_report_step();

    let sources = select_sources(project.sources_for_plot(well, plot), &args.sources);
    if sources.is_empty() {
        warn!(well, plot = ?plot, "No data sources for well");
    }

    let map = project.time_steps_for_plot(well, plot, &sources, policy);
    let time_steps = time_step_options(&map);

    let selected = args
        .select
        .iter()
        .map(|text| parse_timestamp(text).with_context(|| format!("Invalid time step '{text}'")))
        .collect::<Result<BTreeSet<_>>>()?;
    let curves: Vec<CurveDefinitionSummary> = if selected.is_empty() {
        Vec::new()
    } else {
        project
            .curve_defs_for_plot(well, plot, &selected, &sources, policy)
            .iter()
            .map(CurveDefinitionSummary::from)
            .collect()
    };
    info!(well, time_steps = time_steps.len(), curves = curves.len(), "Report ready");

    let axis_title = match plot {
        PlotKind::Plt => Some(flow_plot_axis_title(FlowCondition::Reservoir, args.units.into())),
        PlotKind::Rft => None,
    };

    let report = Report {
        well: well.to_string(),
        sim_well: project.sim_well_name(well).to_string(),
        plot,
        axis_title,
        sources: sources
            .iter()
            .map(|s| SourceSummary {
                kind: s.kind(),
                id: s.id().to_string(),
            })
            .collect(),
        time_steps,
        curves,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

/// Keep only sources whose id is in `ids`; all sources when `ids` is empty.
fn select_sources(sources: Vec<DataSourceRef>, ids: &[String]) -> Vec<DataSourceRef> {
    if ids.is_empty() {
        return sources;
    }
    for id in ids {
        if !sources.iter().any(|s| s.id().as_str() == id) {
            warn!(id = %id, "Unknown source id, ignoring");
        }
    }
    sources
        .into_iter()
        .filter(|s| ids.iter().any(|id| s.id().as_str() == id))
        .collect()
}

fn print_text(report: &Report) {
    println!("Well: {} (simulation well {})", report.well, report.sim_well);
    if let Some(title) = &report.axis_title {
        println!("Axis: {title}");
    }

    println!("\nSources:");
    for source in &report.sources {
        println!("  [{}] {}", source.kind.tag(), source.id);
    }

    println!("\nTime steps:");
    for option in &report.time_steps {
        println!("  {}", option.label);
    }

    if !report.curves.is_empty() {
        println!("\nCurves:");
        for curve in &report.curves {
            println!(
                "  {}  {} '{}'  well {}",
                curve.time_step, curve.kind, curve.source_id, curve.well_name
            );
        }
    }
}
