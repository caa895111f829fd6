use crate::error::DataError;
use crate::inputs::alignment::CalendarAligner;
use crate::inputs::duplicates::resolve_duplicates;
use crate::inputs::half_hourly::filter_half_hourly;
use crate::inputs::series::{Frame, TimeSeries};
use crate::inputs::zero_fill::fill_zero_gaps;
use crate::inputs::{ENERGY_DEMAND, SOLAR_IRRADIANCE};

/// Turns a raw table into the series the optimiser consumes.
pub trait PreProcessor {
    fn pre_process(&self, frame: Frame) -> Result<TimeSeries, DataError>;
}

/// Half-hourly demand without repeated timestamps.
#[derive(Debug, Clone)]
pub struct DemandPreProcessor {
    pub column: String,
}

impl DemandPreProcessor {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Default for DemandPreProcessor {
    fn default() -> Self {
        Self::new(ENERGY_DEMAND)
    }
}

impl PreProcessor for DemandPreProcessor {
    fn pre_process(&self, frame: Frame) -> Result<TimeSeries, DataError> {
        let resolved = resolve_duplicates(&frame, &self.column)?;
        Ok(filter_half_hourly(resolved))
    }
}

/// Irradiance cleaned of dropouts and laid over every year of `demand`.
#[derive(Debug, Clone)]
pub struct IrradiancePreProcessor<'a> {
    pub column: String,
    demand: &'a TimeSeries,
}

impl<'a> IrradiancePreProcessor<'a> {
    pub fn new(demand: &'a TimeSeries) -> Self {
        Self {
            column: SOLAR_IRRADIANCE.to_string(),
            demand,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }
}

impl PreProcessor for IrradiancePreProcessor<'_> {
    fn pre_process(&self, frame: Frame) -> Result<TimeSeries, DataError> {
        let resolved = resolve_duplicates(&frame, &self.column)?;
        let filled = fill_zero_gaps(resolved);
        CalendarAligner::new(self.demand).align(&filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn at(year: i32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, 4, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_demand_is_deduplicated_then_filtered() {
        let frame = Frame::new(vec![
            at(2021, 1, 0, 0),
            at(2021, 1, 0, 0),
            at(2021, 1, 0, 15),
            at(2021, 1, 0, 30),
        ])
        .with_column(ENERGY_DEMAND, vec![1.0, 3.0, 9.0, 4.0])
        .unwrap();

        let demand = DemandPreProcessor::default().pre_process(frame).unwrap();

        assert_eq!(
            demand.into_points(),
            vec![(at(2021, 1, 0, 0), 2.0), (at(2021, 1, 0, 30), 4.0)]
        );
    }

    #[test]
    fn test_irradiance_is_filled_and_aligned_to_demand() {
        // day two at noon reads zero and borrows day one's reading
        let timestamps: Vec<NaiveDateTime> = (0..48)
            .map(|h| at(2019, 1, 0, 0) + TimeDelta::hours(h))
            .collect();
        let mut values = vec![0.0; 48];
        values[12] = 400.0;
        let frame = Frame::new(timestamps)
            .with_column(SOLAR_IRRADIANCE, values)
            .unwrap();
        let demand: TimeSeries = (0..96)
            .map(|i| (at(2022, 1, 0, 0) + TimeDelta::minutes(30 * i), 1.0))
            .collect();

        let irradiance = IrradiancePreProcessor::new(&demand)
            .pre_process(frame)
            .unwrap();

        assert_eq!(irradiance.len(), demand.len());
        let noon_day_two = irradiance
            .points()
            .iter()
            .find(|(timestamp, _)| *timestamp == at(2022, 2, 12, 0))
            .map(|&(_, value)| value);
        assert_eq!(noon_day_two, Some(400.0));
    }

    #[test]
    fn test_custom_column_must_exist() {
        let frame = Frame::new(vec![at(2019, 1, 0, 0)])
            .with_column(SOLAR_IRRADIANCE, vec![1.0])
            .unwrap();
        let demand = TimeSeries::default();

        let result = IrradiancePreProcessor::new(&demand)
            .with_column("ghi")
            .pre_process(frame);

        assert!(matches!(result, Err(DataError::MissingColumn(_))));
    }
}
