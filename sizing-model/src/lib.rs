pub mod sizing;

pub use sizing::objective::{OptimisationObjective, UnknownObjective};
pub use sizing::parameters::SizingParameters;
pub use sizing::summary::{CostBreakdown, SizingSummary, SolveStatus};
