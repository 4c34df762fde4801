//! Project Integration Tests
//!
//! Loads a project file from disk and walks the RFT and PLT flows a plot
//! editor goes through: source discovery, time step options, curve
//! definitions for a selection.

use std::collections::BTreeSet;
use std::io::Write;

use wellplot_tools::config::FirstReportStepPolicy;
use wellplot_tools::types::parse_timestamp;
use wellplot_tools::{
    curve_def_from_curve, format_time_step_options, DataSourceKind, PlotCurve, PlotKind, Project,
    ProjectError, TimeStamp,
};
use wellplot_tools::config::LabelConfig;

const FIELD_PROJECT: &str = r#"
[[well_paths]]
name = "F-11 B"
sim_well = "F11B"

[[well_paths.log_files]]
id = "F-11B_MDT.las"
date = "2019-11-04"
channels = ["DEPT", "PRESSURE", "TEMP"]

[[well_paths.log_files]]
id = "F-11B_PLT.las"
date = "2020-02-10T14:30:00"
channels = ["DEPT", "QOIL_SURFACE", "QWAT", "F11B_QGAS"]

[[grid_cases]]
id = "HM_2020"
name = "History match 2020"
time_steps = ["2019-01-01", "2019-07-01", "2020-01-01", "2020-07-01"]
results = ["PRESSURE", "SWAT"]
wells = { F11B = [1, 2, 3], F12 = [0, 1, 2, 3] }

[[grid_cases.rft]]
well = "F11B"
time = "2019-11-04"
channels = ["PRESSURE", "SWAT"]

[[grid_cases.rft]]
well = "F11B"
time = "2020-02-10"
channels = ["ORAT", "GRAT", "WRAT"]
"#;

fn ts(text: &str) -> TimeStamp {
    parse_timestamp(text).unwrap()
}

fn write_project(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn rft_plot_offers_observed_dates_and_neighbors() {
    let file = write_project(FIELD_PROJECT);
    let project = Project::load(file.path()).unwrap();

    let sources = project.sources_for_plot("F-11 B", PlotKind::Rft);
    let map = project.time_steps_for_plot("F-11 B", PlotKind::Rft, &sources, FirstReportStepPolicy::Auto);
    let options = format_time_step_options(&map, &LabelConfig::default());

    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    // Baseline {2019-11-04}: RFT matches exactly; grid neighbors 2019-07-01 and
    // 2020-01-01; the first report step is forced in for pressure plots.
    assert_eq!(
        labels,
        vec![
            "01.01.2019  [ G ]",
            "01.07.2019  [ G ]",
            "04.11.2019  [ O R ]",
            "01.01.2020  [ G ]",
        ]
    );
}

#[test]
fn plt_plot_labels_show_minutes_when_needed() {
    let file = write_project(FIELD_PROJECT);
    let project = Project::load(file.path()).unwrap();

    let sources = project.sources_for_plot("F11B", PlotKind::Plt);
    let kinds: Vec<_> = sources.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![DataSourceKind::Rft, DataSourceKind::Grid, DataSourceKind::Observed]
    );

    let map = project.time_steps_for_plot("F11B", PlotKind::Plt, &sources, FirstReportStepPolicy::Auto);
    let options = format_time_step_options(&map, &LabelConfig::default());
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    // Baseline {2020-02-10 14:30}: RFT 2020-02-10 lies before it, so it only
    // comes in through the latest-candidate fallback.
    assert_eq!(
        labels,
        vec![
            "01.01.2020 00:00  [ G ]",
            "10.02.2020 00:00  [ R ]",
            "10.02.2020 14:30  [ O ]",
            "01.07.2020 00:00  [ G ]",
        ]
    );
}

#[test]
fn selected_time_steps_expand_to_curves() {
    let project = Project::from_toml_str(FIELD_PROJECT).unwrap();
    let sources = project.sources_for_plot("F-11 B", PlotKind::Rft);
    let selected = BTreeSet::from([ts("2019-11-04"), ts("2019-01-01")]);

    let defs = project.curve_defs_for_plot(
        "F-11 B",
        PlotKind::Rft,
        &selected,
        &sources,
        FirstReportStepPolicy::Auto,
    );

    let summary: Vec<_> = defs
        .iter()
        .map(|d| (d.time_step(), d.source().id().to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ts("2019-01-01"), "HM_2020".to_string()),
            (ts("2019-11-04"), "HM_2020".to_string()),
            (ts("2019-11-04"), "F-11B_MDT.las".to_string()),
        ]
    );
}

#[test]
fn never_policy_drops_first_report_step() {
    let project = Project::from_toml_str(FIELD_PROJECT).unwrap();
    let sources = project.sources_for_plot("F-11 B", PlotKind::Rft);
    let map = project.time_steps_for_plot("F-11 B", PlotKind::Rft, &sources, FirstReportStepPolicy::Never);
    assert!(!map.contains(&ts("2019-01-01")));
}

#[test]
fn grid_extraction_curve_recovers_definition() {
    let project = Project::from_toml_str(FIELD_PROJECT).unwrap();
    let case = project.grid_cases_for_well("F11B").remove(0);

    let def = curve_def_from_curve(&PlotCurve::GridExtraction {
        case,
        well_name: "F11B".to_string(),
        time_step_index: 2,
    })
    .unwrap();

    assert_eq!(def.time_step(), ts("2020-01-01"));
    assert_eq!(def.source().kind(), DataSourceKind::Grid);
}

#[test]
fn missing_project_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Project::load(&dir.path().join("missing.toml")).err().unwrap();
    assert!(matches!(err, ProjectError::Io { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn malformed_project_file_is_parse_error() {
    let file = write_project("[[grid_cases]]\nid = 7\n");
    assert!(matches!(Project::load(file.path()), Err(ProjectError::Parse(_))));
}
