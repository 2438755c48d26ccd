pub mod calculation;

pub use calculation::{CalculationRunner, RunOutcome};
