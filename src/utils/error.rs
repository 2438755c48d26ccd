use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Could not {method} {url} status: {status} msg: {body}")]
    ApiStatusError {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("When adding a derived profile you must configure a source case")]
    MissingSource,

    #[error("Failed to create summary instance from argument:{case} ({reason})")]
    SourceLoadError { case: String, reason: String },

    #[error("No such summary key: {key}")]
    UnknownSeriesKey { key: String },

    #[error("Invalid profile id: {id} for this project")]
    UnknownProfile { id: String },

    #[error("Unknown scale factor: '{tag}'")]
    UnknownScaleFactor { tag: String },

    #[error("Invalid time interval start after end: {start} > {end}")]
    InvalidTimeInterval { start: NaiveDate, end: NaiveDate },

    #[error("No such tax mode: {tax_mode}")]
    UnknownTaxMode { tax_mode: String },

    #[error("Result key {key} missing for tax mode {tax_mode}")]
    MissingResultKey { key: String, tax_mode: String },

    #[error("Request has already been finalized")]
    RequestFinalized,

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Lookup,
    Range,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SteaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SteaError::ApiError(_) | SteaError::ApiStatusError { .. } => ErrorCategory::Network,
            SteaError::ConfigError { .. }
            | SteaError::ConfigValidationError { .. }
            | SteaError::MissingConfigError { .. }
            | SteaError::InvalidConfigValueError { .. }
            | SteaError::MissingSource
            | SteaError::SourceLoadError { .. } => ErrorCategory::Configuration,
            SteaError::UnknownSeriesKey { .. }
            | SteaError::UnknownProfile { .. }
            | SteaError::UnknownScaleFactor { .. }
            | SteaError::UnknownTaxMode { .. }
            | SteaError::MissingResultKey { .. } => ErrorCategory::Lookup,
            SteaError::InvalidTimeInterval { .. } => ErrorCategory::Range,
            SteaError::CsvError(_)
            | SteaError::SerializationError(_)
            | SteaError::RequestFinalized
            | SteaError::ProcessingError { .. } => ErrorCategory::Data,
            SteaError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration
            | ErrorCategory::Lookup
            | ErrorCategory::Range
            | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Communication with the Stea server failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Lookup => format!("Lookup failed: {}", self),
            ErrorCategory::Range => format!("Invalid profile window: {}", self),
            ErrorCategory::Data => format!("Could not process data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SteaError::ApiError(_) | SteaError::ApiStatusError { .. } => {
                "Check stea_server and that the project id/version exist on the server"
            }
            SteaError::MissingSource | SteaError::SourceLoadError { .. } => {
                "Set ecl_case in the config file or pass --ecl-case"
            }
            SteaError::UnknownSeriesKey { .. } => "Check ecl_key against the keys in the case",
            SteaError::UnknownProfile { .. } => {
                "Use a profile id (or Description) defined in the Stea project"
            }
            SteaError::InvalidTimeInterval { .. } => {
                "Make sure start_date/start_year is not after end_year or the end of the case"
            }
            SteaError::UnknownScaleFactor { .. } => {
                "The project declares an unsupported Multiple; supported: 1, Mill, 1000 Mill"
            }
            _ => match self.category() {
                ErrorCategory::Configuration => "Fix the configuration file and try again",
                ErrorCategory::System => "Check file permissions and available disk space",
                _ => "Inspect the log output for details",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SteaError>;
