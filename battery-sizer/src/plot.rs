use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::optimiser::SizingOutcome;

/// Draws the solved battery and flow series against the slice index.
pub fn plot_results(outcome: &SizingOutcome, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(values), Some(total), Some(excess)) =
        (outcome.values.as_ref(), outcome.total_to_house(), outcome.excess())
    else {
        return Err(format!("cannot plot an outcome with status {}", outcome.status).into());
    };

    let series: [(&str, &[f64], RGBColor); 5] = [
        ("state_of_charge", &values.state_of_charge, BLUE),
        ("renewable_to_house", &values.renewable_to_house, RGBColor(230, 160, 0)),
        ("battery_to_house", &values.battery_to_house, GREEN),
        ("total_electricity_to_house", &total, BLACK),
        ("excess_electricity", &excess, RED),
    ];

    let (y_min, y_max) = series
        .iter()
        .flat_map(|(_, data, _)| data.iter())
        .fold((0f64, 0f64), |(low, high), &y| (low.min(y), high.max(y)));
    let y_max = if y_max > y_min { y_max } else { y_min + 1.0 };
    let slices = values.state_of_charge.len().max(1) as f64;

    let root = BitMapBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Battery {:.2} kWh, solar {:.2} m²",
                values.battery_capacity, values.solar_size
            ),
            ("sans-serif", 30),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..slices, y_min..y_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc("Time slice")
        .y_desc("Energy (kWh)")
        .draw()?;

    for (label, data, color) in series {
        chart
            .draw_series(LineSeries::new(
                data.iter().enumerate().map(|(i, &y)| (i as f64, y)),
                &color,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    info!(path = %path.display(), "saved plot");
    Ok(())
}
