use good_lp::{ProblemVariables, Solution, Variable, variable};

/// The solar array is either an input or something the optimiser picks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolarSizing {
    Fixed(f64),
    Optimised(Variable),
}

impl SolarSizing {
    pub fn value(&self, solution: &impl Solution) -> f64 {
        match *self {
            SolarSizing::Fixed(size) => size,
            SolarSizing::Optimised(size) => solution.value(size),
        }
    }

    pub fn is_optimised(&self) -> bool {
        matches!(self, SolarSizing::Optimised(_))
    }
}

/// Every decision variable of one sizing problem, indexed by time slice.
#[derive(Debug, Clone)]
pub struct DecisionVariables {
    pub renewable_to_house: Vec<Variable>,
    pub renewable_to_battery: Vec<Variable>,
    pub battery_to_house: Vec<Variable>,
    pub state_of_charge: Vec<Variable>,
    pub battery_capacity: Variable,
    pub solar_size: SolarSizing,
}

impl DecisionVariables {
    /// Registers the variables for `slices` time slices. All of them are continuous and
    /// non-negative. Without a fixed size the solar array becomes a variable as well.
    pub fn create(vars: &mut ProblemVariables, slices: usize, fixed_solar: Option<f64>) -> Self {
        let solar_size = match fixed_solar {
            Some(size) => SolarSizing::Fixed(size),
            None => SolarSizing::Optimised(vars.add(variable().min(0.0))),
        };

        Self {
            renewable_to_house: vars.add_vector(variable().min(0.0), slices),
            renewable_to_battery: vars.add_vector(variable().min(0.0), slices),
            battery_to_house: vars.add_vector(variable().min(0.0), slices),
            state_of_charge: vars.add_vector(variable().min(0.0), slices),
            battery_capacity: vars.add(variable().min(0.0)),
            solar_size,
        }
    }

    pub fn slices(&self) -> usize {
        self.state_of_charge.len()
    }
}
