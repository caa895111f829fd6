use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::sizing::objective::OptimisationObjective;

/// Outcome reported by the LP solver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, TS,
)]
#[ts(export, export_to = "./summary.ts")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// The problem was never handed to a solver.
    #[default]
    NotSolved,
    /// The solver stopped without a usable answer.
    Undefined,
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::NotSolved => "Not Solved",
            SolveStatus::Undefined => "Undefined",
        };
        f.write_str(name)
    }
}

/// Capital cost split, only present for the cost objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./summary.ts")]
pub struct CostBreakdown {
    pub battery_cost: f64,
    pub solar_cost: f64,
}

impl CostBreakdown {
    pub fn total_cost(&self) -> f64 {
        self.battery_cost + self.solar_cost
    }
}

/// Aggregated view of a solved sizing problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./summary.ts")]
pub struct SizingSummary {
    pub status: SolveStatus,
    pub objective: OptimisationObjective,
    /// Number of half-hour slices in the optimised horizon.
    pub time_slices: u32,
    /// Battery capacity (kWh).
    pub battery_capacity: f64,
    /// Solar array area (m²), fixed or optimised.
    pub solar_size: f64,
    pub renewable_to_house: f64,
    pub renewable_to_battery: f64,
    pub battery_to_house: f64,
    pub total_demand: f64,
    /// Largest absolute difference between supplied and demanded energy in one slice.
    pub max_abs_excess: f64,
    pub costs: Option<CostBreakdown>,
}

impl SizingSummary {
    /// Share of the demand served straight from the solar array.
    pub fn direct_solar_share(&self) -> f64 {
        if self.total_demand > 0.0 {
            self.renewable_to_house / self.total_demand
        } else {
            0.0
        }
    }
}
