use crate::utils::error::{Result, SteaError};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::Path;

pub const DEFAULT_RESPONSE_FILE: &str = "stea_response.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "stea")]
#[command(about = "Submit simulated production profiles to Stea and collect the economic results")]
pub struct CliArgs {
    #[arg(short, long, help = "Stea configuration file (TOML)")]
    pub config: String,

    #[arg(short, long, default_value = DEFAULT_RESPONSE_FILE, help = "File for the full JSON response")]
    pub response_file: String,

    #[arg(short, long, help = "Override the ecl_case from the configuration file")]
    pub ecl_case: Option<String>,

    #[arg(short, long, default_value = ".", help = "Directory for the <KEY>_0 result files")]
    pub output_path: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print the request payload and skip the calculation")]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Validate for CliArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("config", &self.config)?;
        if !Path::new(&self.config).is_file() {
            return Err(SteaError::InvalidConfigValueError {
                field: "config".to_string(),
                value: self.config.clone(),
                reason: "No such file".to_string(),
            });
        }

        validation::validate_path("response_file", &self.response_file)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(case) = &self.ecl_case {
            validation::validate_path("ecl_case", case)?;
        }
        Ok(())
    }
}
