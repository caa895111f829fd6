use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sizing_model::SizingParameters;

use crate::inputs::{DATE_TIME, ENERGY_DEMAND, SOLAR_IRRADIANCE};

pub const PLOT_FILE_NAME: &str = "optimisation_output.png";

/// Everything one sizing run needs: where the inputs are, how they are laid out,
/// the model parameters and where results go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub solar_irradiance_path: PathBuf,
    pub energy_demand_profile_path: PathBuf,
    pub output_path: PathBuf,

    // Input layout
    pub timestamp_column: String,
    pub demand_column: String,
    pub irradiance_column: String,

    pub parameters: SizingParameters,
    /// Render a PNG next to the CSV output.
    pub plot: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            solar_irradiance_path: PathBuf::from("data/solar_irradiance.csv"),
            energy_demand_profile_path: PathBuf::from("data/energy_demand.csv"),
            output_path: PathBuf::from("output"),

            timestamp_column: DATE_TIME.to_string(),
            demand_column: ENERGY_DEMAND.to_string(),
            irradiance_column: SOLAR_IRRADIANCE.to_string(),

            parameters: SizingParameters::default(),
            plot: true,
        }
    }
}

impl RunConfig {
    pub fn plot_path(&self) -> PathBuf {
        self.output_path.join(PLOT_FILE_NAME)
    }
}
