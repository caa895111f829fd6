use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::DataError;
use crate::inputs::DATE_TIME;
use crate::inputs::pre_processing::PreProcessor;
use crate::inputs::series::{Frame, TimeSeries};

/// Timestamp layouts accepted in input files, tried in order.
pub const TIMESTAMP_FORMATS: [&str; 3] = ["%d/%m/%Y %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Reads a delimited time-series file and hands it to a pre-processor.
pub struct InputLoader<P> {
    pre_processor: P,
    timestamp_column: String,
}

impl<P: PreProcessor> InputLoader<P> {
    pub fn new(pre_processor: P) -> Self {
        Self {
            pre_processor,
            timestamp_column: DATE_TIME.to_string(),
        }
    }

    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = column.into();
        self
    }

    pub fn read(&self, path: &Path) -> Result<TimeSeries, DataError> {
        let frame = read_frame(path, &self.timestamp_column)?;
        info!(
            path = %path.display(),
            rows = frame.len(),
            "read input file"
        );
        self.pre_processor.pre_process(frame)
    }
}

pub fn read_frame(path: &Path, timestamp_column: &str) -> Result<Frame, DataError> {
    parse_frame(File::open(path)?, timestamp_column)
}

/// Parses comma-delimited text with a header row. Every column other than the
/// timestamp column is read as `f64`.
pub fn parse_frame<R: Read>(reader: R, timestamp_column: &str) -> Result<Frame, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let timestamp_index = headers
        .iter()
        .position(|header| header == timestamp_column)
        .ok_or_else(|| DataError::MissingColumn(timestamp_column.to_string()))?;
    let value_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != timestamp_index)
        .collect();

    let mut timestamps = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); value_columns.len()];

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = row + 2;

        let raw = record.get(timestamp_index).unwrap_or_default();
        timestamps.push(parse_timestamp(raw).ok_or_else(|| DataError::InvalidTimestamp {
            line,
            value: raw.to_string(),
        })?);

        for (values, &(index, name)) in columns.iter_mut().zip(&value_columns) {
            let raw = record.get(index).unwrap_or_default();
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => {
                    return Err(DataError::InvalidValue {
                        line,
                        column: name.to_string(),
                        value: raw.to_string(),
                    });
                }
            }
        }
    }

    value_columns
        .into_iter()
        .zip(columns)
        .try_fold(Frame::new(timestamps), |frame, ((_, name), values)| {
            frame.with_column(name, values)
        })
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
