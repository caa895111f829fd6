pub mod objective;
pub mod parameters;
pub mod summary;
