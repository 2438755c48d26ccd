pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{LocalStorage, SteaClient, SummaryCase};
pub use app::{CalculationRunner, RunOutcome};
pub use config::SteaConfig;
pub use core::assembly::make_request;
pub use core::project::Project;
pub use core::request::RequestBuilder;
pub use utils::error::{Result, SteaError};
