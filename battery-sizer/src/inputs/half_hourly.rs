use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use crate::inputs::series::TimeSeries;

pub fn is_half_hour_aligned(timestamp: &NaiveDateTime) -> bool {
    matches!(timestamp.minute(), 0 | 30)
}

/// Keeps the samples that sit on the hour or the half hour, keeping their order.
pub fn filter_half_hourly(series: TimeSeries) -> TimeSeries {
    let before = series.len();
    let filtered: TimeSeries = series
        .into_iter()
        .filter(|(timestamp, _)| is_half_hour_aligned(timestamp))
        .collect();

    let dropped = before - filtered.len();
    if dropped > 0 {
        debug!(dropped, "dropped samples off the half-hour grid");
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 5, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_only_half_hour_samples_remain() {
        let series = TimeSeries::new(vec![
            (at(0, 15), 1.0),
            (at(0, 45), 2.0),
            (at(1, 0), 3.0),
            (at(1, 30), 4.0),
            (at(1, 31), 5.0),
            (at(2, 0), 6.0),
        ]);
        let off_grid = series
            .timestamps()
            .filter(|timestamp| !is_half_hour_aligned(timestamp))
            .count();

        let filtered = filter_half_hourly(series.clone());

        assert_eq!(filtered.len(), series.len() - off_grid);
        assert_eq!(
            filtered.into_points(),
            vec![(at(1, 0), 3.0), (at(1, 30), 4.0), (at(2, 0), 6.0)]
        );
    }

    #[test]
    fn test_aligned_series_is_unchanged() {
        let series = TimeSeries::new(vec![(at(0, 0), 1.0), (at(0, 30), 2.0)]);
        assert_eq!(filter_half_hourly(series.clone()), series);
    }
}
