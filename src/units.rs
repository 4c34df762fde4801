//! Flow rate and flow volume unit texts for PLT axis titles and curve names

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::FlowPhase;

/// Conditions flow rates are reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowCondition {
    #[default]
    Reservoir,
    Standard,
}

/// Unit system of the case or log file the curve comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Field,
    Lab,
    Unknown,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Metric => "metric",
            Self::Field => "field",
            Self::Lab => "lab",
            Self::Unknown => "unknown",
        })
    }
}

// ============================================================================
// Rates
// ============================================================================

/// `"Reservoir Flow Rate [m³/day]"`, `"Surface Flow Rate [...]"`.
pub fn flow_plot_axis_title(condition: FlowCondition, unit_system: UnitSystem) -> String {
    let quantity = match condition {
        FlowCondition::Reservoir => "Reservoir Flow Rate",
        FlowCondition::Standard => "Surface Flow Rate",
    };
    format!("{quantity} {}", flow_unit_text(condition, unit_system))
}

fn reservoir_rate_unit(unit_system: UnitSystem) -> &'static str {
    match unit_system {
        UnitSystem::Metric => "[m³/day]",
        UnitSystem::Field => "[Brl/day]",
        UnitSystem::Lab => "[cm³/hr]",
        UnitSystem::Unknown => "",
    }
}

/// Unit text covering every phase of a flow plot.
pub fn flow_unit_text(condition: FlowCondition, unit_system: UnitSystem) -> &'static str {
    match condition {
        FlowCondition::Reservoir => reservoir_rate_unit(unit_system),
        FlowCondition::Standard => match unit_system {
            UnitSystem::Metric => "[Liquid Sm³/day], [Gas kSm³/day]",
            UnitSystem::Field => "[Liquid BBL/day], [Gas BOE/day]",
            UnitSystem::Lab => "[cm³/hr]",
            UnitSystem::Unknown => "",
        },
    }
}

/// Unit text for one curve of `phase`.
///
/// At standard conditions gas is reported in its own unit; phases without
/// a unit of their own get the combined text.
pub fn curve_unit_text(condition: FlowCondition, unit_system: UnitSystem, phase: FlowPhase) -> &'static str {
    if condition == FlowCondition::Reservoir {
        return reservoir_rate_unit(unit_system);
    }
    match (unit_system, phase) {
        (UnitSystem::Metric, FlowPhase::Gas) => "[kSm³/day]",
        (UnitSystem::Metric, FlowPhase::Oil | FlowPhase::Water) => "[Sm³/day]",
        (UnitSystem::Field, FlowPhase::Gas) => "[BOE/day]",
        (UnitSystem::Field, FlowPhase::Oil | FlowPhase::Water) => "[BBL/day]",
        _ => flow_unit_text(condition, unit_system),
    }
}

// ============================================================================
// Volumes
// ============================================================================

/// `"Reservoir Flow Volume [m³]"`, `"Surface Flow Volume [...]"`.
pub fn flow_volume_plot_axis_title(condition: FlowCondition, unit_system: UnitSystem) -> String {
    let quantity = match condition {
        FlowCondition::Reservoir => "Reservoir Flow Volume",
        FlowCondition::Standard => "Surface Flow Volume",
    };
    format!("{quantity} {}", flow_volume_unit_text(condition, unit_system))
}

/// Accumulated volume counterpart of [`flow_unit_text`].
pub fn flow_volume_unit_text(condition: FlowCondition, unit_system: UnitSystem) -> &'static str {
    match (condition, unit_system) {
        (_, UnitSystem::Unknown) => "",
        (_, UnitSystem::Lab) => "[cm³]",
        (FlowCondition::Reservoir, UnitSystem::Metric) => "[m³]",
        (FlowCondition::Reservoir, UnitSystem::Field) => "[Brl]",
        (FlowCondition::Standard, UnitSystem::Metric) => "[Liquid Sm³], [Gas kSm³]",
        (FlowCondition::Standard, UnitSystem::Field) => "[Liquid BBL], [Gas BOE]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_titles() {
        assert_eq!(
            flow_plot_axis_title(FlowCondition::Reservoir, UnitSystem::Metric),
            "Reservoir Flow Rate [m³/day]"
        );
        assert_eq!(
            flow_plot_axis_title(FlowCondition::Standard, UnitSystem::Field),
            "Surface Flow Rate [Liquid BBL/day], [Gas BOE/day]"
        );
        assert_eq!(
            flow_volume_plot_axis_title(FlowCondition::Standard, UnitSystem::Metric),
            "Surface Flow Volume [Liquid Sm³], [Gas kSm³]"
        );
    }

    #[test]
    fn test_curve_units_per_phase() {
        let std = FlowCondition::Standard;
        assert_eq!(curve_unit_text(std, UnitSystem::Metric, FlowPhase::Gas), "[kSm³/day]");
        assert_eq!(curve_unit_text(std, UnitSystem::Metric, FlowPhase::Water), "[Sm³/day]");
        assert_eq!(curve_unit_text(std, UnitSystem::Field, FlowPhase::Oil), "[BBL/day]");
        assert_eq!(
            curve_unit_text(std, UnitSystem::Field, FlowPhase::Total),
            "[Liquid BBL/day], [Gas BOE/day]"
        );
        assert_eq!(curve_unit_text(std, UnitSystem::Lab, FlowPhase::Gas), "[cm³/hr]");
    }

    #[test]
    fn test_reservoir_curve_units_ignore_phase() {
        for phase in FlowPhase::SELECTABLE {
            assert_eq!(
                curve_unit_text(FlowCondition::Reservoir, UnitSystem::Field, phase),
                "[Brl/day]"
            );
        }
    }

    #[test]
    fn test_unknown_unit_system_has_no_unit() {
        assert_eq!(flow_unit_text(FlowCondition::Standard, UnitSystem::Unknown), "");
        assert_eq!(flow_volume_unit_text(FlowCondition::Reservoir, UnitSystem::Unknown), "");
        assert_eq!(
            flow_plot_axis_title(FlowCondition::Reservoir, UnitSystem::Unknown),
            "Reservoir Flow Rate "
        );
    }
}
