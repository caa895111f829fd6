use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::SizingError;
use crate::inputs::{AlignedPair, DemandPreProcessor, InputLoader, IrradiancePreProcessor};
use crate::optimiser::{SizingOutcome, SizingProblem};
use crate::plot::plot_results;

/// Reads demand, lays irradiance over it and builds the problem for the whole timeline.
pub fn prepare(config: &RunConfig) -> Result<SizingProblem, SizingError> {
    let demand = InputLoader::new(DemandPreProcessor::new(config.demand_column.as_str()))
        .with_timestamp_column(config.timestamp_column.as_str())
        .read(&config.energy_demand_profile_path)?;

    let irradiance = InputLoader::new(
        IrradiancePreProcessor::new(&demand).with_column(config.irradiance_column.as_str()),
    )
    .with_timestamp_column(config.timestamp_column.as_str())
    .read(&config.solar_irradiance_path)?;

    let pair = AlignedPair::new(demand, irradiance)?;
    Ok(SizingProblem::construct(
        &pair,
        pair.time_slices(),
        &config.parameters,
    )?)
}

/// Loads both inputs, sizes the system and writes the results.
///
/// A non-optimal outcome is returned as is, with nothing written.
pub fn run_model(config: &RunConfig) -> Result<SizingOutcome> {
    let problem = prepare(config).with_context(|| {
        format!(
            "Failed to prepare sizing for {} and {}",
            config.energy_demand_profile_path.display(),
            config.solar_irradiance_path.display()
        )
    })?;
    let outcome = problem.solve();

    if !outcome.is_optimal() {
        warn!(
            status = %outcome.status,
            message = outcome.message.as_deref().unwrap_or_default(),
            "no optimal sizing found, skipping output"
        );
        return Ok(outcome);
    }

    outcome
        .dump_results(&config.output_path)
        .with_context(|| format!("Failed to write results to {}", config.output_path.display()))?;

    if config.plot {
        let plot_path = config.plot_path();
        plot_results(&outcome, &plot_path)
            .map_err(|error| anyhow::anyhow!("Failed to plot {}: {error}", plot_path.display()))?;
    }

    if let Some(summary) = outcome.summary() {
        info!(
            battery_capacity = summary.battery_capacity,
            solar_size = summary.solar_size,
            direct_solar_share = summary.direct_solar_share(),
            "sizing complete"
        );
    }
    Ok(outcome)
}
