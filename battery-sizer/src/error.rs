use chrono::NaiveDateTime;
use sizing_model::{OptimisationObjective, UnknownObjective};
use thiserror::Error;

/// Parameter problems detected before any model is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    UnknownObjective(#[from] UnknownObjective),
    #[error("a solar array size is required when the objective is {0}")]
    MissingSolarSize(OptimisationObjective),
    #[error("battery capex and solar capex are both required when the objective is {0}")]
    MissingCapex(OptimisationObjective),
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("time slices {start}..{end} do not cover the {len} aligned samples")]
    TimeSliceMismatch { start: usize, end: usize, len: usize },
}

/// Input data that does not have the shape the pipeline requires.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{column}' has {actual} values but the frame has {expected} timestamps")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("series is empty")]
    EmptySeries,
    #[error("line {line}: cannot parse timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },
    #[error("line {line}: cannot parse '{value}' in column '{column}'")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },
    #[error("cannot truncate timestamp to the half hour")]
    Rounding(#[from] chrono::RoundingError),
    #[error("cannot move {timestamp} into year {year}")]
    YearShift { timestamp: NaiveDateTime, year: i32 },
    #[error("{count} demand timestamps have no irradiance sample, the first is {first}")]
    UnmatchedTimestamps { first: NaiveDateTime, count: usize },
    #[error("demand has {demand} samples but irradiance has {irradiance}")]
    LengthMismatch { demand: usize, irradiance: usize },
    #[error("timestamps differ at slice {index}: demand {demand}, irradiance {irradiance}")]
    Misaligned {
        index: usize,
        demand: NaiveDateTime,
        irradiance: NaiveDateTime,
    },
    #[error("timestamps are not strictly increasing at slice {index} ({timestamp})")]
    Unordered {
        index: usize,
        timestamp: NaiveDateTime,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Either kind of failure that stops a sizing run before the solver is reached.
#[derive(Debug, Error)]
pub enum SizingError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
}
