pub mod constraints;
pub mod objective;
pub mod problem;
pub mod results;
pub mod variables;

pub use constraints::BatteryParameters;
pub use objective::{Capex, SizingGoal};
pub use problem::{Advisory, SizingProblem};
pub use results::{OUTPUT_FILE_NAME, SizingOutcome, SolvedValues};
pub use variables::{DecisionVariables, SolarSizing};
