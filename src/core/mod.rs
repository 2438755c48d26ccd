pub mod assembly;
pub mod extractor;
pub mod project;
pub mod request;
pub mod result;
pub mod units;

pub use crate::domain::model::{CalculationRequest, CalculationResult, ExtractedProfile};
pub use crate::domain::ports::{Interval, SteaApi, Storage, TimeSeriesSource};
pub use crate::utils::error::Result;
