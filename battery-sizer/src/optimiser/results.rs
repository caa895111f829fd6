use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use good_lp::Solution;
use sizing_model::{CostBreakdown, SizingSummary, SolveStatus};
use tracing::{info, warn};

use crate::error::DataError;
use crate::inputs::DATE_TIME;
use crate::optimiser::objective::SizingGoal;
use crate::optimiser::variables::DecisionVariables;

pub const OUTPUT_FILE_NAME: &str = "optimisation_output.csv";
const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Variable values of an optimal solution.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedValues {
    pub renewable_to_house: Vec<f64>,
    pub renewable_to_battery: Vec<f64>,
    pub battery_to_house: Vec<f64>,
    pub state_of_charge: Vec<f64>,
    pub battery_capacity: f64,
    pub solar_size: f64,
}

impl SolvedValues {
    pub fn read(solution: &impl Solution, vars: &DecisionVariables) -> Self {
        let series = |variables: &[good_lp::Variable]| -> Vec<f64> {
            variables.iter().map(|&var| solution.value(var)).collect()
        };

        Self {
            renewable_to_house: series(&vars.renewable_to_house),
            renewable_to_battery: series(&vars.renewable_to_battery),
            battery_to_house: series(&vars.battery_to_house),
            state_of_charge: series(&vars.state_of_charge),
            battery_capacity: solution.value(vars.battery_capacity),
            solar_size: vars.solar_size.value(solution),
        }
    }

    /// Energy delivered to the house in each slice from either source.
    pub fn total_to_house(&self) -> Vec<f64> {
        self.renewable_to_house
            .iter()
            .zip(&self.battery_to_house)
            .map(|(solar, battery)| solar + battery)
            .collect()
    }
}

/// What came back from the solver for one sizing problem.
///
/// Only an optimal outcome carries values. Callers check `status` before relying
/// on any derived series.
#[derive(Debug, Clone)]
pub struct SizingOutcome {
    pub status: SolveStatus,
    /// Solver message for an undefined status.
    pub message: Option<String>,
    pub goal: SizingGoal,
    pub timestamps: Vec<NaiveDateTime>,
    pub demand: Vec<f64>,
    pub values: Option<SolvedValues>,
    pub solve_duration: Duration,
}

impl SizingOutcome {
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn total_to_house(&self) -> Option<Vec<f64>> {
        self.values.as_ref().map(SolvedValues::total_to_house)
    }

    /// Delivered energy minus demand per slice, zero up to solver tolerance.
    pub fn excess(&self) -> Option<Vec<f64>> {
        self.total_to_house().map(|total| {
            total
                .iter()
                .zip(&self.demand)
                .map(|(delivered, demand)| delivered - demand)
                .collect()
        })
    }

    /// Capital cost of the chosen sizes, for the cost objective only.
    pub fn costs(&self) -> Option<CostBreakdown> {
        let capex = self.goal.capex()?;
        let values = self.values.as_ref()?;
        Some(CostBreakdown {
            battery_cost: values.battery_capacity * capex.battery,
            solar_cost: values.solar_size * capex.solar,
        })
    }

    pub fn summary(&self) -> Option<SizingSummary> {
        let values = self.values.as_ref()?;
        let max_abs_excess = self
            .excess()
            .unwrap_or_default()
            .iter()
            .fold(0.0_f64, |max, excess| max.max(excess.abs()));

        Some(SizingSummary {
            status: self.status,
            objective: self.goal.objective(),
            time_slices: self.timestamps.len() as u32,
            battery_capacity: values.battery_capacity,
            solar_size: values.solar_size,
            renewable_to_house: values.renewable_to_house.iter().sum(),
            renewable_to_battery: values.renewable_to_battery.iter().sum(),
            battery_to_house: values.battery_to_house.iter().sum(),
            total_demand: self.demand.iter().sum(),
            max_abs_excess,
            costs: self.costs(),
        })
    }

    /// Writes one row per slice. Writes nothing for an outcome without values.
    pub fn write_results<W: Write>(&self, writer: W) -> Result<(), DataError> {
        let Some(values) = &self.values else {
            return Ok(());
        };
        let total = values.total_to_house();
        let costs = self.costs();

        let mut writer = csv::Writer::from_writer(writer);
        let mut header = vec![
            DATE_TIME,
            "renewable_to_house",
            "renewable_to_battery",
            "battery_to_house",
            "state_of_charge",
            "total_electricity_to_house",
            "excess_electricity",
            "battery_capacity",
            "solar_size",
        ];
        if costs.is_some() {
            header.extend(["battery_cost", "solar_cost", "total_cost"]);
        }
        writer.write_record(&header)?;

        for (t, timestamp) in self.timestamps.iter().enumerate() {
            let mut row = vec![
                timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string(),
                values.renewable_to_house[t].to_string(),
                values.renewable_to_battery[t].to_string(),
                values.battery_to_house[t].to_string(),
                values.state_of_charge[t].to_string(),
                total[t].to_string(),
                (total[t] - self.demand[t]).to_string(),
                values.battery_capacity.to_string(),
                values.solar_size.to_string(),
            ];
            if let Some(costs) = costs {
                row.extend([
                    costs.battery_cost.to_string(),
                    costs.solar_cost.to_string(),
                    costs.total_cost().to_string(),
                ]);
            }
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes `optimisation_output.csv` into `output_dir` and returns its path.
    pub fn dump_results(&self, output_dir: &Path) -> Result<Option<PathBuf>, DataError> {
        if self.values.is_none() {
            warn!(status = %self.status, "no solution to dump");
            return Ok(None);
        }

        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(OUTPUT_FILE_NAME);
        self.write_results(File::create(&path)?)?;

        info!(path = %path.display(), rows = self.timestamps.len(), "wrote results");
        Ok(Some(path))
    }
}
