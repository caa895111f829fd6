use std::fmt;
use std::ops::Range;
use std::time::Instant;

use chrono::NaiveDateTime;
use good_lp::{
    Constraint, Expression, ProblemVariables, ResolutionError, Solver, SolverModel, clarabel,
};
use sizing_model::{OptimisationObjective, SizingParameters, SolveStatus};
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::inputs::AlignedPair;
use crate::optimiser::constraints::{BatteryParameters, energy_balance_constraints};
use crate::optimiser::objective::{Capex, SizingGoal, objective_expression};
use crate::optimiser::results::{SizingOutcome, SolvedValues};
use crate::optimiser::variables::DecisionVariables;

/// A supplied parameter that the chosen objective does not use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advisory {
    IgnoredCapex {
        battery: Option<f64>,
        solar: Option<f64>,
    },
    IgnoredSolarSize(f64),
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::IgnoredCapex { battery, solar } => write!(
                f,
                "capex (battery {battery:?}, solar {solar:?}) is ignored when the objective is {}",
                OptimisationObjective::MinimiseBatteryCapacity
            ),
            Advisory::IgnoredSolarSize(size) => write!(
                f,
                "solar array size {size} is ignored, the objective {} optimises it",
                OptimisationObjective::MinimiseBatteryAndSolarCost
            ),
        }
    }
}

/// A linear program sizing the battery (and optionally the solar array) for one
/// aligned demand and irradiance pair. Built once and consumed by solving.
pub struct SizingProblem {
    variables: ProblemVariables,
    decision: DecisionVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
    goal: SizingGoal,
    advisories: Vec<Advisory>,
    timestamps: Vec<NaiveDateTime>,
    demand: Vec<f64>,
}

impl SizingProblem {
    pub fn construct(
        pair: &AlignedPair,
        time_slices: Range<usize>,
        params: &SizingParameters,
    ) -> Result<Self, ConfigError> {
        if time_slices != pair.time_slices() {
            return Err(ConfigError::TimeSliceMismatch {
                start: time_slices.start,
                end: time_slices.end,
                len: pair.len(),
            });
        }
        validate(params)?;

        let (goal, fixed_solar, advisories) = resolve_goal(params)?;
        for advisory in &advisories {
            warn!("{advisory}");
        }

        let mut variables = ProblemVariables::new();
        let decision = DecisionVariables::create(&mut variables, pair.len(), fixed_solar);
        let objective = objective_expression(&goal, &decision);
        let constraints = energy_balance_constraints(
            pair,
            &decision,
            params.solar_efficiency,
            BatteryParameters {
                initial_capacity: params.initial_battery_capacity,
                degradation_rate: params.battery_degradation_rate,
            },
        );

        info!(
            objective = %goal.objective(),
            optimised_solar = goal.objective().optimises_solar_size(),
            slices = pair.len(),
            constraints = constraints.len(),
            "constructed sizing problem"
        );

        Ok(Self {
            variables,
            decision,
            objective,
            constraints,
            goal,
            advisories,
            timestamps: pair.timestamps().to_vec(),
            demand: pair.demand().to_vec(),
        })
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn goal(&self) -> SizingGoal {
        self.goal
    }

    pub fn decision_variables(&self) -> &DecisionVariables {
        &self.decision
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Solves with the bundled interior-point solver.
    pub fn solve(self) -> SizingOutcome {
        self.solve_with(clarabel)
    }

    /// Solves with any good_lp backend. A non-optimal result is reported in the
    /// outcome's status and never returned as an error.
    pub fn solve_with<S: Solver>(self, solver: S) -> SizingOutcome
    where
        S::Model: SolverModel<Error = ResolutionError>,
    {
        let SizingProblem {
            variables,
            decision,
            objective,
            constraints,
            goal,
            timestamps,
            demand,
            ..
        } = self;

        let start = Instant::now();
        let mut model = variables.minimise(objective).using(solver);
        for constraint in constraints {
            model = model.with(constraint);
        }
        let result = model.solve();
        let solve_duration = start.elapsed();

        let (status, message, values) = match result {
            Ok(solution) => (
                SolveStatus::Optimal,
                None,
                Some(SolvedValues::read(&solution, &decision)),
            ),
            Err(ResolutionError::Infeasible) => (SolveStatus::Infeasible, None, None),
            Err(ResolutionError::Unbounded) => (SolveStatus::Unbounded, None, None),
            Err(error) => (SolveStatus::Undefined, Some(error.to_string()), None),
        };

        info!(
            %status,
            duration_ms = solve_duration.as_millis() as u64,
            "solved sizing problem"
        );
        if let Some(values) = &values {
            debug!(
                battery_capacity = values.battery_capacity,
                solar_size = values.solar_size,
                "optimal sizing"
            );
        }

        SizingOutcome {
            status,
            message,
            goal,
            timestamps,
            demand,
            values,
            solve_duration,
        }
    }
}

fn validate(params: &SizingParameters) -> Result<(), ConfigError> {
    let invalid = |name, value, reason| ConfigError::InvalidParameter {
        name,
        value,
        reason,
    };

    let initial = params.initial_battery_capacity;
    if !initial.is_finite() || initial < 0.0 {
        return Err(invalid(
            "initial_battery_capacity",
            initial,
            "must be a non-negative number",
        ));
    }
    let rate = params.battery_degradation_rate;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(
            "battery_degradation_rate",
            rate,
            "must lie between 0 and 1",
        ));
    }
    let efficiency = params.solar_efficiency;
    if !(efficiency > 0.0 && efficiency <= 1.0) {
        return Err(invalid(
            "solar_efficiency",
            efficiency,
            "must be above 0 and at most 1",
        ));
    }

    let optional = [
        ("solar_array_size", params.solar_array_size),
        ("battery_capex", params.battery_capex),
        ("solar_capex", params.solar_capex),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, value, "must be a non-negative number"));
            }
        }
    }
    Ok(())
}

fn resolve_goal(
    params: &SizingParameters,
) -> Result<(SizingGoal, Option<f64>, Vec<Advisory>), ConfigError> {
    let objective = params.optimisation_objective;
    let mut advisories = Vec::new();

    match objective {
        OptimisationObjective::MinimiseBatteryCapacity => {
            let solar_size = params
                .solar_array_size
                .ok_or(ConfigError::MissingSolarSize(objective))?;
            if params.battery_capex.is_some() || params.solar_capex.is_some() {
                advisories.push(Advisory::IgnoredCapex {
                    battery: params.battery_capex,
                    solar: params.solar_capex,
                });
            }
            Ok((SizingGoal::MinimiseBatteryCapacity, Some(solar_size), advisories))
        }
        OptimisationObjective::MinimiseBatteryAndSolarCost => {
            let (Some(battery), Some(solar)) = (params.battery_capex, params.solar_capex) else {
                return Err(ConfigError::MissingCapex(objective));
            };
            if let Some(size) = params.solar_array_size {
                advisories.push(Advisory::IgnoredSolarSize(size));
            }
            Ok((
                SizingGoal::MinimiseBatteryAndSolarCost(Capex { battery, solar }),
                None,
                advisories,
            ))
        }
    }
}
