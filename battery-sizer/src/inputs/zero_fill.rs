use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::inputs::series::TimeSeries;

/// Replaces zero irradiance samples with the previous day's value at the same time of
/// day, when that value is non-zero.
///
/// Irradiance repeats closely from one day to the next, so a zero where yesterday had
/// sun is treated as a sensor dropout. Days are visited in order, which means a value
/// filled on day `D` can in turn fill day `D + 1`. Samples whose previous-day slot is
/// missing stay as they are.
pub fn fill_zero_gaps(series: TimeSeries) -> TimeSeries {
    let mut points = series.into_points();
    let slots: HashMap<(NaiveDate, NaiveTime), usize> = points
        .iter()
        .enumerate()
        .map(|(index, (timestamp, _))| ((timestamp.date(), timestamp.time()), index))
        .collect();

    let mut filled = 0;
    for index in 0..points.len() {
        let (timestamp, value) = points[index];
        if value != 0.0 {
            continue;
        }
        let Some(previous_day) = timestamp.date().pred_opt() else {
            continue;
        };
        if let Some(&previous) = slots.get(&(previous_day, timestamp.time())) {
            let previous_value = points[previous].1;
            if previous_value != 0.0 {
                points[index].1 = previous_value;
                filled += 1;
            }
        }
    }

    if filled > 0 {
        debug!(filled, "filled zero irradiance samples from the previous day");
    }
    TimeSeries::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_zero_is_replaced_by_previous_day_value() {
        let series = TimeSeries::new(vec![
            (at(1, 11), 300.0),
            (at(1, 12), 450.0),
            (at(2, 11), 310.0),
            (at(2, 12), 0.0),
        ]);

        let filled = fill_zero_gaps(series);

        assert_eq!(filled.points()[3], (at(2, 12), 450.0));
        assert_eq!(filled.points()[2], (at(2, 11), 310.0));
    }

    #[test]
    fn test_zero_stays_when_previous_day_is_zero() {
        let series = TimeSeries::new(vec![(at(1, 0), 0.0), (at(2, 0), 0.0)]);

        let filled = fill_zero_gaps(series.clone());

        assert_eq!(filled, series);
    }

    #[test]
    fn test_first_day_is_untouched() {
        let series = TimeSeries::new(vec![(at(1, 12), 0.0), (at(1, 13), 200.0)]);

        let filled = fill_zero_gaps(series.clone());

        assert_eq!(filled, series);
    }

    #[test]
    fn test_day_without_predecessor_is_untouched() {
        // July 3rd has no July 2nd to borrow from
        let series = TimeSeries::new(vec![(at(1, 12), 500.0), (at(3, 12), 0.0)]);

        let filled = fill_zero_gaps(series.clone());

        assert_eq!(filled, series);
    }

    #[test]
    fn test_fill_carries_over_consecutive_zero_days() {
        let series = TimeSeries::new(vec![(at(1, 12), 500.0), (at(2, 12), 0.0), (at(3, 12), 0.0)]);

        let filled = fill_zero_gaps(series);

        assert_eq!(filled.values().collect::<Vec<_>>(), vec![500.0, 500.0, 500.0]);
    }
}
