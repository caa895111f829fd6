use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::DataError;
use crate::inputs::series::{Frame, TimeSeries};

/// Collapses repeated timestamps of `column` into one sample each.
///
/// Repeats with identical values keep that value, repeats with differing values are
/// replaced by their arithmetic mean. The result is sorted by timestamp.
pub fn resolve_duplicates(frame: &Frame, column: &str) -> Result<TimeSeries, DataError> {
    let values = frame
        .column(column)
        .ok_or_else(|| DataError::MissingColumn(column.to_string()))?;

    let mut samples: BTreeMap<NaiveDateTime, Vec<f64>> = BTreeMap::new();
    for (&timestamp, &value) in frame.timestamps().iter().zip(values) {
        samples.entry(timestamp).or_default().push(value);
    }

    let collapsed = frame.len() - samples.len();
    if collapsed > 0 {
        debug!(column, collapsed, "resolved duplicate timestamps");
    }

    Ok(samples
        .into_iter()
        .map(|(timestamp, values)| (timestamp, collapse(&values)))
        .collect())
}

fn collapse(values: &[f64]) -> f64 {
    match values {
        [first, rest @ ..] if rest.iter().all(|value| value == first) => *first,
        _ => values.iter().sum::<f64>() / values.len() as f64,
    }
}
