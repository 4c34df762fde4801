//! Channel and flow phase types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// RFT result channel reported by an RFT reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelKind {
    Pressure,
    Swat,
    Soil,
    Sgas,
    Wrat,
    Orat,
    Grat,
}

impl ChannelKind {
    /// Rate channels used by PLT plots.
    pub const RATES: [Self; 3] = [Self::Orat, Self::Wrat, Self::Grat];

    pub const fn is_rate(self) -> bool {
        matches!(self, Self::Wrat | Self::Orat | Self::Grat)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pressure => "PRESSURE",
            Self::Swat => "SWAT",
            Self::Soil => "SOIL",
            Self::Sgas => "SGAS",
            Self::Wrat => "WRAT",
            Self::Orat => "ORAT",
            Self::Grat => "GRAT",
        };
        f.write_str(name)
    }
}

/// Physical quantity carried by a flow channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowPhase {
    Oil,
    Gas,
    Water,
    Total,
    None,
}

impl FlowPhase {
    /// Selectable phases, in classification priority order.
    pub const SELECTABLE: [Self; 4] = [Self::Oil, Self::Gas, Self::Water, Self::Total];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Oil => "Oil",
            Self::Gas => "Gas",
            Self::Water => "Water",
            Self::Total => "Total",
            Self::None => "None",
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plot family requesting time steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Pressure vs depth (RFT plot).
    #[default]
    Rft,
    /// Phase flow rates along the well (PLT plot).
    Plt,
}

impl PlotKind {
    pub fn channel_kinds(self) -> BTreeSet<ChannelKind> {
        match self {
            Self::Rft => BTreeSet::from([ChannelKind::Pressure]),
            Self::Plt => ChannelKind::RATES.into_iter().collect(),
        }
    }
}

/// Whether grid cases should offer their first report step.
///
/// Pressure plots show the initial state, rate plots do not.
pub fn first_report_step_for(channel_kinds: &BTreeSet<ChannelKind>) -> bool {
    channel_kinds.contains(&ChannelKind::Pressure)
}
