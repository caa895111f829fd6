use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use chrono::{Datelike, DurationRound, NaiveDateTime, TimeDelta};
use tracing::{debug, info};

use crate::error::DataError;
use crate::inputs::series::{Point, TimeSeries};

pub const HALF_HOUR_MINUTES: i64 = 30;

fn half_hour() -> TimeDelta {
    TimeDelta::minutes(HALF_HOUR_MINUTES)
}

/// Upsamples a series onto a half-hour grid using backward fill.
///
/// The grid runs from the first timestamp truncated to the half hour up to the last
/// one, and every grid point takes the first sample at or after it. One extra slot
/// half an hour past the end repeats the final value, so an hourly year ending at
/// 23:00 also covers 23:30.
pub fn resample_half_hourly(series: &TimeSeries) -> Result<TimeSeries, DataError> {
    let (Some(&(first, _)), Some(&(last, last_value))) = (series.first(), series.last()) else {
        return Err(DataError::EmptySeries);
    };

    let points = series.points();
    let end = last.duration_trunc(half_hour())?;
    let mut slot = first.duration_trunc(half_hour())?;
    let mut next = 0;
    let mut resampled = Vec::new();

    while slot <= end {
        while points[next].0 < slot {
            next += 1;
        }
        resampled.push((slot, points[next].1));
        slot += half_hour();
    }
    resampled.push((slot, last_value));

    debug!(
        samples = series.len(),
        slots = resampled.len(),
        "resampled series to half-hourly"
    );
    Ok(TimeSeries::new(resampled))
}

/// Moves every sample into `year`, keeping month, day and time of day.
///
/// A 29 February sample has no counterpart in a non-leap year and is dropped.
pub fn shift_to_year(series: &TimeSeries, year: i32) -> Result<Vec<Point>, DataError> {
    let mut shifted = Vec::with_capacity(series.len());
    for &(timestamp, value) in series.points() {
        match timestamp.with_year(year) {
            Some(moved) => shifted.push((moved, value)),
            None if timestamp.month() == 2 && timestamp.day() == 29 => {}
            None => return Err(DataError::YearShift { timestamp, year }),
        }
    }
    Ok(shifted)
}

/// Repeats a single reference year of irradiance across every calendar year of a
/// demand profile.
pub struct CalendarAligner<'a> {
    demand: &'a TimeSeries,
}

impl<'a> CalendarAligner<'a> {
    pub fn new(demand: &'a TimeSeries) -> Self {
        Self { demand }
    }

    /// Returns irradiance indexed by exactly the demand timestamps.
    ///
    /// Every demand timestamp must find an irradiance sample. Uncovered rows are an
    /// error rather than being filled.
    pub fn align(&self, irradiance: &TimeSeries) -> Result<TimeSeries, DataError> {
        let resampled = resample_half_hourly(irradiance)?;
        let years: BTreeSet<i32> = self.demand.timestamps().map(|t| t.year()).collect();

        let mut lookup: HashMap<NaiveDateTime, f64> = HashMap::new();
        for &year in &years {
            for (timestamp, value) in shift_to_year(&resampled, year)? {
                lookup.entry(timestamp).or_insert(value);
            }
        }

        let mut aligned = Vec::with_capacity(self.demand.len());
        let mut unmatched: Option<(NaiveDateTime, usize)> = None;
        for timestamp in self.demand.timestamps() {
            match lookup.get(&timestamp) {
                Some(&value) => aligned.push((timestamp, value)),
                None => {
                    let (_, count) = unmatched.get_or_insert((timestamp, 0));
                    *count += 1;
                }
            }
        }

        if let Some((first, count)) = unmatched {
            return Err(DataError::UnmatchedTimestamps { first, count });
        }

        info!(
            years = years.len(),
            slices = aligned.len(),
            "aligned irradiance to demand"
        );
        Ok(TimeSeries::new(aligned))
    }
}

/// Demand and irradiance sharing one strictly increasing half-hourly index.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    timestamps: Vec<NaiveDateTime>,
    demand: Vec<f64>,
    irradiance: Vec<f64>,
}

impl AlignedPair {
    pub fn new(demand: TimeSeries, irradiance: TimeSeries) -> Result<Self, DataError> {
        if demand.len() != irradiance.len() {
            return Err(DataError::LengthMismatch {
                demand: demand.len(),
                irradiance: irradiance.len(),
            });
        }
        if let Some((index, (d, i))) = demand
            .timestamps()
            .zip(irradiance.timestamps())
            .enumerate()
            .find(|(_, (d, i))| d != i)
        {
            return Err(DataError::Misaligned {
                index,
                demand: d,
                irradiance: i,
            });
        }
        demand.ensure_strictly_increasing()?;

        Ok(Self {
            timestamps: demand.timestamps().collect(),
            demand: demand.values().collect(),
            irradiance: irradiance.values().collect(),
        })
    }

    /// Builds a pair on consecutive half hours from `start`.
    pub fn from_values(
        start: NaiveDateTime,
        demand: Vec<f64>,
        irradiance: Vec<f64>,
    ) -> Result<Self, DataError> {
        let stamp = |index: usize| start + half_hour() * index as i32;
        Self::new(
            demand.into_iter().enumerate().map(|(i, v)| (stamp(i), v)).collect(),
            irradiance.into_iter().enumerate().map(|(i, v)| (stamp(i), v)).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn irradiance(&self) -> &[f64] {
        &self.irradiance
    }

    /// Indices of every slice in the pair.
    pub fn time_slices(&self) -> Range<usize> {
        0..self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn half_hours(start: NaiveDateTime, count: usize, value: f64) -> TimeSeries {
        (0..count)
            .map(|i| (start + half_hour() * i as i32, value))
            .collect()
    }

    #[test]
    fn test_resample_backward_fills_and_appends_trailing_slot() {
        let hourly = TimeSeries::new(vec![
            (at(2019, 1, 1, 0, 0), 10.0),
            (at(2019, 1, 1, 1, 0), 20.0),
            (at(2019, 1, 1, 2, 0), 30.0),
        ]);

        let resampled = resample_half_hourly(&hourly).unwrap();

        assert_eq!(
            resampled.into_points(),
            vec![
                (at(2019, 1, 1, 0, 0), 10.0),
                (at(2019, 1, 1, 0, 30), 20.0),
                (at(2019, 1, 1, 1, 0), 20.0),
                (at(2019, 1, 1, 1, 30), 30.0),
                (at(2019, 1, 1, 2, 0), 30.0),
                (at(2019, 1, 1, 2, 30), 30.0),
            ]
        );
    }

    #[test]
    fn test_resample_empty_series_fails() {
        assert!(matches!(
            resample_half_hourly(&TimeSeries::default()),
            Err(DataError::EmptySeries)
        ));
    }

    #[test]
    fn test_feb_29_is_dropped_for_non_leap_year() {
        let series = TimeSeries::new(vec![
            (at(2020, 2, 28, 12, 0), 1.0),
            (at(2020, 2, 29, 12, 0), 2.0),
            (at(2020, 3, 1, 12, 0), 3.0),
        ]);

        let shifted = shift_to_year(&series, 2019).unwrap();

        assert_eq!(
            shifted,
            vec![(at(2019, 2, 28, 12, 0), 1.0), (at(2019, 3, 1, 12, 0), 3.0)]
        );
    }

    #[test]
    fn test_feb_29_is_kept_for_leap_year() {
        let series = TimeSeries::new(vec![(at(2020, 2, 29, 12, 0), 2.0)]);

        let shifted = shift_to_year(&series, 2024).unwrap();

        assert_eq!(shifted, vec![(at(2024, 2, 29, 12, 0), 2.0)]);
    }

    #[test]
    fn test_aligned_timestamps_equal_demand_timestamps() {
        // two days of hourly irradiance in 2019, demand across the same dates in 2021 and 2022
        let irradiance: TimeSeries = (0..48)
            .map(|h| (at(2019, 6, 1, 0, 0) + TimeDelta::hours(h), h as f64))
            .collect();
        let demand: TimeSeries = half_hours(at(2021, 6, 1, 0, 0), 96, 1.0)
            .into_iter()
            .chain(half_hours(at(2022, 6, 1, 0, 0), 96, 2.0))
            .collect();

        let aligned = CalendarAligner::new(&demand).align(&irradiance).unwrap();

        assert_eq!(
            aligned.timestamps().collect::<Vec<_>>(),
            demand.timestamps().collect::<Vec<_>>()
        );
        // 00:30 takes the 01:00 sample
        assert_eq!(aligned.points()[1].1, 1.0);
        assert_eq!(aligned.points()[97].1, 1.0);
        // the trailing synthetic slot covers 23:30 on the second day
        assert_eq!(aligned.points()[95].1, 47.0);
    }

    #[test]
    fn test_uncovered_demand_is_an_error() {
        let irradiance = TimeSeries::new(vec![(at(2019, 6, 1, 0, 0), 1.0), (at(2019, 6, 1, 1, 0), 2.0)]);
        let demand = half_hours(at(2021, 6, 1, 0, 0), 6, 1.0);

        let result = CalendarAligner::new(&demand).align(&irradiance);

        assert!(matches!(
            result,
            Err(DataError::UnmatchedTimestamps { first, count: 2 }) if first == at(2021, 6, 1, 2, 0)
        ));
    }

    #[test]
    fn test_pair_rejects_mismatched_inputs() {
        let start = at(2021, 1, 1, 0, 0);

        let result = AlignedPair::from_values(start, vec![1.0, 1.0], vec![0.0]);
        assert!(matches!(
            result,
            Err(DataError::LengthMismatch {
                demand: 2,
                irradiance: 1
            })
        ));

        let shifted = half_hours(start + half_hour(), 2, 0.0);
        let result = AlignedPair::new(half_hours(start, 2, 1.0), shifted);
        assert!(matches!(result, Err(DataError::Misaligned { index: 0, .. })));
    }

    #[test]
    fn test_pair_exposes_time_slices() {
        let pair =
            AlignedPair::from_values(at(2021, 1, 1, 0, 0), vec![1.0, 2.0, 3.0], vec![0.0; 3])
                .unwrap();

        assert_eq!(pair.time_slices(), 0..3);
        assert_eq!(pair.timestamps()[2], at(2021, 1, 1, 1, 0));
        assert_eq!(pair.demand(), &[1.0, 2.0, 3.0]);
    }
}
