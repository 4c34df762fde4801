//! Channel Classifier - maps channel names to pressure / flow phases
//!
//! Each phase family has a fixed list of patterns. A pattern starting with
//! `^` is a regular expression that must match the whole channel name; any
//! other pattern is a plain name that matches when the channel name contains
//! it, ignoring case.
//!
//! The pattern table is built once on first use and never mutated.
//!
//! ## Usage
//!
//! ```ignore
//! assert_eq!(channels::classify("A1_QOIL"), FlowPhase::Oil);
//! assert!(channels::is_pressure_channel("Pressure"));
//! ```

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::sources::{GridCase, WellLogFile};
use crate::types::FlowPhase;

/// Pressure channel / result names, matched case-insensitively as whole names.
pub const PRESSURE_DATA_NAMES: [&str; 2] = ["PRESSURE", "PRES_FORM"];

pub const OIL_CHANNEL_NAMES: [&str; 3] = ["QOZT", "QOIL", r"^.*\D_QOIL"];
pub const GAS_CHANNEL_NAMES: [&str; 3] = ["QGZT", "QGAS", r"^.*\D_QGAS"];
pub const WATER_CHANNEL_NAMES: [&str; 3] = ["QWZT", "QWAT", r"^.*\D_QWAT"];
pub const TOTAL_CHANNEL_NAMES: [&str; 3] = ["QTZT", "QTOT", r"^.*\D_QTOT"];

// ============================================================================
// Pattern table
// ============================================================================

enum ChannelPattern {
    /// Plain name: matches if the channel name contains it (case-insensitive).
    Name(String),
    /// Full-match regular expression.
    Regex(Regex),
}

impl ChannelPattern {
    fn compile(pattern: &str) -> Option<Self> {
        let Some(body) = pattern.strip_prefix('^') else {
            return Some(Self::Name(pattern.to_uppercase()));
        };
        match Regex::new(&format!("^(?:{body})$")) {
            Ok(re) => Some(Self::Regex(re)),
            Err(e) => {
                warn!(pattern, error = %e, "Invalid channel pattern, skipping");
                None
            }
        }
    }

    fn matches(&self, channel_name: &str, upper_name: &str) -> bool {
        match self {
            Self::Name(name) => upper_name.contains(name.as_str()),
            Self::Regex(re) => re.is_match(channel_name),
        }
    }
}

struct ChannelTable {
    /// Phase families in classification priority order.
    families: Vec<(FlowPhase, Vec<ChannelPattern>)>,
}

impl ChannelTable {
    fn build() -> Self {
        let compile_all = |patterns: &[&str]| -> Vec<ChannelPattern> {
            patterns.iter().filter_map(|p| ChannelPattern::compile(p)).collect()
        };

        Self {
            families: vec![
                (FlowPhase::Oil, compile_all(&OIL_CHANNEL_NAMES[..])),
                (FlowPhase::Gas, compile_all(&GAS_CHANNEL_NAMES[..])),
                (FlowPhase::Water, compile_all(&WATER_CHANNEL_NAMES[..])),
                (FlowPhase::Total, compile_all(&TOTAL_CHANNEL_NAMES[..])),
            ],
        }
    }

    fn phases_matching<'a>(&'a self, channel_name: &'a str) -> impl Iterator<Item = FlowPhase> + 'a {
        let upper = channel_name.to_uppercase();
        self.families
            .iter()
            .filter(move |(_, patterns)| patterns.iter().any(|p| p.matches(channel_name, &upper)))
            .map(|(phase, _)| *phase)
    }
}

static CHANNEL_TABLE: OnceLock<ChannelTable> = OnceLock::new();

fn table() -> &'static ChannelTable {
    CHANNEL_TABLE.get_or_init(ChannelTable::build)
}

// ============================================================================
// Classification
// ============================================================================

/// Classify a channel name into a flow phase.
///
/// Families are tried in the order oil, gas, water, total; the first match
/// wins.
pub fn classify(channel_name: &str) -> FlowPhase {
    table()
        .phases_matching(channel_name)
        .next()
        .unwrap_or(FlowPhase::None)
}

/// Every phase family matching `channel_name`, in priority order.
pub fn matching_phases(channel_name: &str) -> Vec<FlowPhase> {
    table().phases_matching(channel_name).collect()
}

/// True when a name satisfies more than one phase family.
pub fn is_ambiguous(channel_name: &str) -> bool {
    table().phases_matching(channel_name).nth(1).is_some()
}

pub fn is_flow_channel(channel_name: &str) -> bool {
    classify(channel_name) != FlowPhase::None
}

pub fn is_pressure_channel(channel_name: &str) -> bool {
    PRESSURE_DATA_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(channel_name))
}

// ============================================================================
// Log file and grid case queries
// ============================================================================

pub fn has_pressure_data(file: &dyn WellLogFile) -> bool {
    file.channels().iter().any(|c| is_pressure_channel(c))
}

pub fn has_flow_data(file: &dyn WellLogFile) -> bool {
    file.channels().iter().any(|c| is_flow_channel(c))
}

/// First pressure channel of a log file.
pub fn pressure_channel(file: &dyn WellLogFile) -> Option<&str> {
    file.channels()
        .iter()
        .map(String::as_str)
        .find(|c| is_pressure_channel(c))
}

/// Name of the first pressure result the grid case provides.
pub fn pressure_result_name(case: &dyn GridCase) -> Option<&'static str> {
    PRESSURE_DATA_NAMES
        .iter()
        .copied()
        .find(|name| case.has_result(name))
}

pub fn grid_has_pressure_data(case: &dyn GridCase) -> bool {
    pressure_result_name(case).is_some()
}

/// Whether the grid case has a dynamic result named like a flow channel.
///
/// Only plain names are looked up; regex patterns are not result names.
pub fn grid_has_flow_data(case: &dyn GridCase) -> bool {
    [
        OIL_CHANNEL_NAMES,
        GAS_CHANNEL_NAMES,
        WATER_CHANNEL_NAMES,
        TOTAL_CHANNEL_NAMES,
    ]
    .iter()
    .flatten()
    .filter(|name| !name.starts_with('^'))
    .any(|name| case.has_result(name))
}
