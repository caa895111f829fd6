pub mod alignment;
pub mod duplicates;
pub mod half_hourly;
pub mod loader;
pub mod pre_processing;
pub mod series;
pub mod zero_fill;

pub use alignment::{AlignedPair, CalendarAligner};
pub use loader::InputLoader;
pub use pre_processing::{DemandPreProcessor, IrradiancePreProcessor, PreProcessor};
pub use series::{Frame, Point, TimeSeries};

// Column names used by the input files
pub const DATE_TIME: &str = "date_time";
pub const ENERGY_DEMAND: &str = "consumption_kwh";
pub const SOLAR_IRRADIANCE: &str = "solar_irradiance (W/m)";
