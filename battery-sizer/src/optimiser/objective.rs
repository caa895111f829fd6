use good_lp::Expression;
use sizing_model::OptimisationObjective;

use crate::optimiser::variables::{DecisionVariables, SolarSizing};

/// Weight on total battery throughput added to every objective.
///
/// Charging and discharging in the same slice, or serving the first slice from the
/// battery, cost nothing in the pure sizing objective. The small penalty picks the
/// solution that routes solar straight to the house whenever sizing is unaffected.
pub const THROUGHPUT_TIE_BREAK: f64 = 1e-6;

/// Capital cost per kWh of battery and per m² of solar array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capex {
    pub battery: f64,
    pub solar: f64,
}

/// A validated objective together with the inputs it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingGoal {
    MinimiseBatteryCapacity,
    MinimiseBatteryAndSolarCost(Capex),
}

impl SizingGoal {
    pub fn objective(&self) -> OptimisationObjective {
        match self {
            SizingGoal::MinimiseBatteryCapacity => OptimisationObjective::MinimiseBatteryCapacity,
            SizingGoal::MinimiseBatteryAndSolarCost(_) => {
                OptimisationObjective::MinimiseBatteryAndSolarCost
            }
        }
    }

    pub fn capex(&self) -> Option<Capex> {
        match self {
            SizingGoal::MinimiseBatteryCapacity => None,
            SizingGoal::MinimiseBatteryAndSolarCost(capex) => Some(*capex),
        }
    }
}

/// Builds the expression the solver minimises for `goal`.
///
/// Besides the battery capacity (or the capital cost) it carries
/// `THROUGHPUT_TIE_BREAK` times the total energy charged and discharged, so the
/// objective value reported by a solver exceeds the pure sizing objective by that term.
pub fn objective_expression(goal: &SizingGoal, vars: &DecisionVariables) -> Expression {
    let mut objective = Expression::default();

    match goal {
        SizingGoal::MinimiseBatteryCapacity => {
            objective += vars.battery_capacity;
        }
        SizingGoal::MinimiseBatteryAndSolarCost(capex) => {
            objective += vars.battery_capacity * capex.battery;
            // a fixed array only adds a constant
            if let SolarSizing::Optimised(solar_size) = vars.solar_size {
                objective += solar_size * capex.solar;
            }
        }
    }

    for (&charge, &discharge) in vars
        .renewable_to_battery
        .iter()
        .zip(&vars.battery_to_house)
    {
        objective += charge * THROUGHPUT_TIE_BREAK;
        objective += discharge * THROUGHPUT_TIE_BREAK;
    }

    objective
}
