use std::path::PathBuf;

use anyhow::Result;
use battery_sizer::{RunConfig, run_model};
use clap::Parser;
use sizing_model::{OptimisationObjective, SizingParameters};
use sizing_model::sizing::parameters::{DEFAULT_BATTERY_DEGRADATION_RATE, DEFAULT_SOLAR_EFFICIENCY};
use tracing::{Level, info};

/// Size a battery, and optionally a solar array, for a demand profile.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long)]
    solar_irradiance_path: PathBuf,

    #[arg(long)]
    energy_demand_profile_path: PathBuf,

    /// Directory receiving the CSV and the plot.
    #[arg(long, default_value = "output")]
    output_path: PathBuf,

    /// Solar array size in m², required for `minimise_battery_cap`.
    #[arg(long)]
    solar_array_size: Option<f64>,

    /// Charge at the start of the timeline in kWh.
    #[arg(long, default_value_t = 0.0)]
    initial_battery_capacity: f64,

    /// Fraction of the charge lost per half hour.
    #[arg(long, default_value_t = DEFAULT_BATTERY_DEGRADATION_RATE)]
    battery_degradation_rate: f64,

    /// `minimise_battery_cap` or `minimise_battery_and_solar_cost`.
    #[arg(long, default_value_t = OptimisationObjective::default())]
    optimisation_objective: OptimisationObjective,

    /// Battery cost per kWh.
    #[arg(long)]
    battery_capex: Option<f64>,

    /// Solar array cost per m².
    #[arg(long)]
    solar_capex: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_SOLAR_EFFICIENCY)]
    solar_efficiency: f64,

    #[arg(long, default_value_t = Level::INFO)]
    logging_level: Level,

    /// Skip rendering the PNG plot.
    #[arg(long)]
    no_plot: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            solar_irradiance_path: args.solar_irradiance_path,
            energy_demand_profile_path: args.energy_demand_profile_path,
            output_path: args.output_path,
            parameters: SizingParameters {
                initial_battery_capacity: args.initial_battery_capacity,
                battery_degradation_rate: args.battery_degradation_rate,
                solar_array_size: args.solar_array_size,
                battery_capex: args.battery_capex,
                solar_capex: args.solar_capex,
                solar_efficiency: args.solar_efficiency,
                optimisation_objective: args.optimisation_objective,
            },
            plot: !args.no_plot,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.logging_level)
        .compact()
        .init();

    let outcome = run_model(&RunConfig::from(args))?;
    match outcome.summary() {
        Some(summary) => info!(
            status = %summary.status,
            battery_capacity = summary.battery_capacity,
            solar_size = summary.solar_size,
            total_cost = summary.costs.map(|costs| costs.total_cost()),
            "done"
        ),
        None => info!(status = %outcome.status, "done without a solution"),
    }
    Ok(())
}
