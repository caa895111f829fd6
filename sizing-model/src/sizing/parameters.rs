use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::sizing::objective::OptimisationObjective;

pub const DEFAULT_SOLAR_EFFICIENCY: f64 = 0.15;
pub const DEFAULT_BATTERY_DEGRADATION_RATE: f64 = 0.01;

/// Parameters of a single sizing run.
///
/// Which optional fields are required depends on the objective: the battery capacity
/// objective needs `solar_array_size`, the cost objective needs both capex values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(default)]
#[ts(export, export_to = "./parameters.ts")]
pub struct SizingParameters {
    /// Battery charge at the first time slice (kWh).
    pub initial_battery_capacity: f64,
    /// Fraction of the stored energy lost every time slice.
    pub battery_degradation_rate: f64,
    /// Area of the solar array (m²).
    pub solar_array_size: Option<f64>,
    /// Battery capital cost per kWh of capacity.
    pub battery_capex: Option<f64>,
    /// Solar capital cost per m² of array.
    pub solar_capex: Option<f64>,
    /// Fraction of the incident irradiance converted to electricity.
    pub solar_efficiency: f64,
    pub optimisation_objective: OptimisationObjective,
}

impl Default for SizingParameters {
    fn default() -> Self {
        Self {
            initial_battery_capacity: 0.0,
            battery_degradation_rate: DEFAULT_BATTERY_DEGRADATION_RATE,
            solar_array_size: None,
            battery_capex: None,
            solar_capex: None,
            solar_efficiency: DEFAULT_SOLAR_EFFICIENCY,
            optimisation_objective: OptimisationObjective::default(),
        }
    }
}

impl SizingParameters {
    /// Parameters for minimising the battery behind a solar array of `solar_array_size` m².
    pub fn minimise_battery_capacity(solar_array_size: f64) -> Self {
        Self {
            solar_array_size: Some(solar_array_size),
            optimisation_objective: OptimisationObjective::MinimiseBatteryCapacity,
            ..Default::default()
        }
    }

    /// Parameters for minimising the combined battery and solar capital cost.
    pub fn minimise_cost(battery_capex: f64, solar_capex: f64) -> Self {
        Self {
            battery_capex: Some(battery_capex),
            solar_capex: Some(solar_capex),
            optimisation_objective: OptimisationObjective::MinimiseBatteryAndSolarCost,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let parameters = SizingParameters::default();

        assert_eq!(parameters.initial_battery_capacity, 0.0);
        assert_eq!(parameters.battery_degradation_rate, 0.01);
        assert_eq!(parameters.solar_efficiency, 0.15);
        assert_eq!(parameters.solar_array_size, None);
        assert_eq!(parameters.battery_capex, None);
        assert_eq!(parameters.solar_capex, None);
        assert_eq!(
            parameters.optimisation_objective,
            OptimisationObjective::MinimiseBatteryCapacity
        );
    }

    #[test]
    fn test_constructors_set_objective_inputs() {
        let battery = SizingParameters::minimise_battery_capacity(40.0);
        assert_eq!(battery.solar_array_size, Some(40.0));

        let cost = SizingParameters::minimise_cost(300.0, 150.0);
        assert_eq!(cost.battery_capex, Some(300.0));
        assert_eq!(cost.solar_capex, Some(150.0));
        assert!(cost.optimisation_objective.optimises_solar_size());
    }
}
