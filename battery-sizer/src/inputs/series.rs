use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::error::DataError;

pub type Point = (NaiveDateTime, f64);

/// Time-ordered `(timestamp, value)` samples of a single quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<Point>,
}

impl TimeSeries {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.points.iter().map(|&(timestamp, _)| timestamp)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, value)| value)
    }

    /// Checks that every timestamp is later than the one before it.
    pub fn ensure_strictly_increasing(&self) -> Result<(), DataError> {
        match self
            .points
            .windows(2)
            .position(|pair| pair[0].0 >= pair[1].0)
        {
            Some(index) => Err(DataError::Unordered {
                index: index + 1,
                timestamp: self.points[index + 1].0,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<Point> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TimeSeries {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// A table as it was read from disk: one timestamp per row and any number of numeric
/// columns. Rows keep file order and timestamps may repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    timestamps: Vec<NaiveDateTime>,
    columns: IndexMap<String, Vec<f64>>,
}

impl Frame {
    pub fn new(timestamps: Vec<NaiveDateTime>) -> Self {
        Self {
            timestamps,
            columns: IndexMap::new(),
        }
    }

    /// Builds a single-column frame from a series.
    pub fn from_series(series: &TimeSeries, column: &str) -> Self {
        let mut frame = Self::new(series.timestamps().collect());
        frame
            .columns
            .insert(column.to_string(), series.values().collect());
        frame
    }

    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        if values.len() != self.timestamps.len() {
            return Err(DataError::ColumnLength {
                column: name,
                expected: self.timestamps.len(),
                actual: values.len(),
            });
        }
        self.columns.insert(name, values);
        Ok(self)
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

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_frame_rejects_column_of_wrong_length() {
        let result = Frame::new(vec![at(0, 0), at(0, 30)]).with_column("value", vec![1.0]);
        assert!(matches!(
            result,
            Err(DataError::ColumnLength {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_frame_keeps_column_order() {
        let frame = Frame::new(vec![at(0, 0)])
            .with_column("b", vec![1.0])
            .unwrap()
            .with_column("a", vec![2.0])
            .unwrap();
        assert_eq!(frame.column_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(frame.column("a"), Some(&[2.0][..]));
        assert_eq!(frame.column("c"), None);
    }

    #[test]
    fn test_ensure_strictly_increasing() {
        let ordered = TimeSeries::new(vec![(at(0, 0), 1.0), (at(0, 30), 2.0)]);
        assert!(ordered.ensure_strictly_increasing().is_ok());

        let repeated = TimeSeries::new(vec![(at(0, 0), 1.0), (at(0, 30), 2.0), (at(0, 30), 3.0)]);
        assert!(matches!(
            repeated.ensure_strictly_increasing(),
            Err(DataError::Unordered { index: 2, .. })
        ));
    }
}
