use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

/// What the sizing optimisation minimises.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, TS,
)]
#[ts(export, export_to = "./objective.ts")]
pub enum OptimisationObjective {
    /// Smallest battery that keeps demand covered by a solar array of fixed size.
    #[default]
    #[serde(rename = "minimise_battery_cap")]
    MinimiseBatteryCapacity,
    /// Cheapest combination of battery capacity and solar array area.
    #[serde(rename = "minimise_battery_and_solar_cost")]
    MinimiseBatteryAndSolarCost,
}

/// Returned when an objective name is not one of [`OptimisationObjective::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown optimisation objective: '{0}'")]
pub struct UnknownObjective(pub String);

impl OptimisationObjective {
    pub const ALL: [OptimisationObjective; 2] = [
        OptimisationObjective::MinimiseBatteryCapacity,
        OptimisationObjective::MinimiseBatteryAndSolarCost,
    ];

    /// The name used on the command line and in serialised parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimisationObjective::MinimiseBatteryCapacity => "minimise_battery_cap",
            OptimisationObjective::MinimiseBatteryAndSolarCost => "minimise_battery_and_solar_cost",
        }
    }

    /// Whether the solar array area is a decision variable under this objective.
    pub fn optimises_solar_size(&self) -> bool {
        matches!(self, OptimisationObjective::MinimiseBatteryAndSolarCost)
    }
}

impl fmt::Display for OptimisationObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimisationObjective {
    type Err = UnknownObjective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|objective| objective.as_str() == s.trim())
            .ok_or_else(|| UnknownObjective(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_objective_names() {
        assert_eq!(
            "minimise_battery_cap".parse::<OptimisationObjective>(),
            Ok(OptimisationObjective::MinimiseBatteryCapacity)
        );
        assert_eq!(
            "minimise_battery_and_solar_cost".parse::<OptimisationObjective>(),
            Ok(OptimisationObjective::MinimiseBatteryAndSolarCost)
        );
    }

    #[test]
    fn test_unknown_objective_is_rejected() {
        let error = "maximise_profit".parse::<OptimisationObjective>().unwrap_err();
        assert_eq!(error, UnknownObjective("maximise_profit".to_string()));
        assert_eq!(
            error.to_string(),
            "unknown optimisation objective: 'maximise_profit'"
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for objective in OptimisationObjective::ALL {
            assert_eq!(objective.to_string().parse(), Ok(objective));
        }
    }

    #[test]
    fn test_only_cost_objective_optimises_solar_size() {
        assert!(!OptimisationObjective::MinimiseBatteryCapacity.optimises_solar_size());
        assert!(OptimisationObjective::MinimiseBatteryAndSolarCost.optimises_solar_size());
    }
}
