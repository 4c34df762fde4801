//! Plot tools configuration
//!
//! Two things are configurable: how time step option labels render dates
//! (`[labels]`, strftime strings for date, minute and second resolution)
//! and whether grid cases offer their first report step
//! (`[timeline] first_report_step`). Library functions take these values as
//! arguments; the process-wide copy here serves callers that do not thread
//! a config through, such as [`crate::options::time_step_options`].
//!
//! The report binary loads the file (`$WELLPLOT_CONFIG`, then
//! `./wellplot.toml`, then defaults) and calls [`init`] before any query.

mod plot_config;
pub mod validation;

pub use plot_config::*;

use std::sync::OnceLock;

static PLOT_CONFIG: OnceLock<PlotToolsConfig> = OnceLock::new();

/// Install the process-wide configuration. Later calls are ignored.
pub fn init(config: PlotToolsConfig) {
    if PLOT_CONFIG.set(config).is_err() {
        tracing::warn!("Plot tools config already initialized, ignoring");
    }
}

/// The process-wide configuration.
///
/// Panics before [`init`]; use [`labels`] or [`first_report_step`] where a
/// default is acceptable.
#[allow(clippy::expect_used)]
pub fn get() -> &'static PlotToolsConfig {
    PLOT_CONFIG
        .get()
        .expect("config::get() called before config::init()")
}

pub fn is_initialized() -> bool {
    PLOT_CONFIG.get().is_some()
}

/// Configured label formats, or the defaults before [`init`].
pub fn labels() -> &'static LabelConfig {
    static DEFAULT_LABELS: OnceLock<LabelConfig> = OnceLock::new();
    match PLOT_CONFIG.get() {
        Some(config) => &config.labels,
        None => DEFAULT_LABELS.get_or_init(LabelConfig::default),
    }
}

/// Configured first report step policy, or `auto` before [`init`].
pub fn first_report_step() -> FirstReportStepPolicy {
    PLOT_CONFIG
        .get()
        .map(|config| config.timeline.first_report_step)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit tests never call init(), so these see the defaults.
    #[test]
    fn test_defaults_before_init() {
        assert!(!is_initialized());
        assert_eq!(labels().date_format, "%d.%m.%Y");
        assert_eq!(first_report_step(), FirstReportStepPolicy::Auto);
    }
}
