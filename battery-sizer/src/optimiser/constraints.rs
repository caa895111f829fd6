use good_lp::{Constraint, constraint};

use crate::inputs::AlignedPair;
use crate::optimiser::variables::{DecisionVariables, SolarSizing};

/// Converts a per-slice power reading into the energy of one half hour.
pub const HALF_HOUR_ENERGY_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryParameters {
    pub initial_capacity: f64,
    /// Fraction of the previous slice's charge lost in each slice.
    pub degradation_rate: f64,
}

/// Builds the per-slice energy balance of the house, the array and the battery.
///
/// For every slice `t`:
/// * solar sent to the house and the battery is bounded by the array output,
/// * the house demand is met exactly by solar and battery,
/// * the battery starts at its initial charge and then evolves with charging,
///   discharging and degradation of the previous charge,
/// * the charge never exceeds the battery capacity.
pub fn energy_balance_constraints(
    pair: &AlignedPair,
    vars: &DecisionVariables,
    solar_efficiency: f64,
    battery: BatteryParameters,
) -> Vec<Constraint> {
    let retention = 1.0 - battery.degradation_rate;
    let mut constraints = Vec::with_capacity(pair.len() * 4);

    for t in pair.time_slices() {
        let r2h = vars.renewable_to_house[t];
        let r2b = vars.renewable_to_battery[t];
        let b2h = vars.battery_to_house[t];
        let soc = vars.state_of_charge[t];

        // Generation bound
        let yield_per_size = pair.irradiance()[t] * solar_efficiency * HALF_HOUR_ENERGY_FACTOR;
        constraints.push(match vars.solar_size {
            SolarSizing::Fixed(size) => constraint!(r2h + r2b <= yield_per_size * size),
            SolarSizing::Optimised(size) => constraint!(r2h + r2b <= size * yield_per_size),
        });

        // Demand
        constraints.push(constraint!(r2h + b2h == pair.demand()[t]));

        // Battery dynamics
        if t == 0 {
            constraints.push(constraint!(soc == battery.initial_capacity));
        } else {
            let previous = vars.state_of_charge[t - 1];
            constraints.push(constraint!(soc - previous * retention - r2b + b2h == 0.0));
        }

        // Capacity
        constraints.push(constraint!(soc <= vars.battery_capacity));
    }

    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use good_lp::ProblemVariables;

    #[test]
    fn test_four_constraints_per_slice() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let pair = AlignedPair::from_values(start, vec![1.0; 5], vec![100.0; 5]).unwrap();
        let mut vars = ProblemVariables::new();
        let decision = DecisionVariables::create(&mut vars, pair.len(), Some(10.0));

        let constraints = energy_balance_constraints(
            &pair,
            &decision,
            0.15,
            BatteryParameters {
                initial_capacity: 0.0,
                degradation_rate: 0.01,
            },
        );

        assert_eq!(constraints.len(), 20);
    }
}
