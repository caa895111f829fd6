pub mod config;
pub mod error;
pub mod inputs;
pub mod optimiser;
pub mod plot;
pub mod run;

// Re-export commonly used items for convenience
pub use config::RunConfig;
pub use error::{ConfigError, DataError, SizingError};
pub use optimiser::{SizingOutcome, SizingProblem};
pub use run::run_model;
