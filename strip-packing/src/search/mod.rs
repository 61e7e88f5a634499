//! The search for a minimal container height.
mod driver;
mod options;
mod stopwatch;

pub use driver::*;
pub use options::SearchOptions;
