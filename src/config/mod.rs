#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, SteaError};
use crate::utils::validation::{self, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const PRODUCTION_SERVER: &str = "https://stea-fmu.equinor.com:1700";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Stea 計算的設定檔
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteaConfig {
    /// 隨請求送出的設定時間 (YYYY-MM-DD 或 YYYY-MM-DD HH:MM:SS)
    #[serde(alias = "config-date", deserialize_with = "de_datetime")]
    pub config_date: NaiveDateTime,
    /// Stea 中的 AlternativeId，專案必須已存在於伺服器
    #[serde(alias = "project-id")]
    pub project_id: i64,
    #[serde(alias = "project-version")]
    pub project_version: i64,
    /// 直接在設定檔中給定數值的 profile
    #[serde(default)]
    pub profiles: BTreeMap<String, ExplicitProfile>,
    /// 由模擬結果計算的 profile
    #[serde(alias = "ecl-profiles")]
    pub ecl_profiles: BTreeMap<String, SimulatorProfile>,
    pub results: Vec<String>,
    #[serde(alias = "ecl-case", default)]
    pub ecl_case: Option<String>,
    #[serde(alias = "stea-server", default = "default_server")]
    pub stea_server: String,
    #[serde(alias = "accept-invalid-certs", default)]
    pub accept_invalid_certs: bool,
    #[serde(alias = "timeout-seconds", default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorProfile {
    #[serde(alias = "ecl-key")]
    pub ecl_key: String,
    /// 包含 start_date 當天的產量
    #[serde(alias = "start-date", default, deserialize_with = "de_opt_date")]
    pub start_date: Option<NaiveDate>,
    /// 已棄用，請改用 start_date
    #[serde(alias = "start-year", default)]
    pub start_year: Option<i32>,
    /// 包含 end_year 最後一天為止的資料
    #[serde(alias = "end-year", default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub mult: Option<Vec<f64>>,
    #[serde(alias = "glob-mult", default)]
    pub glob_mult: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitProfile {
    #[serde(alias = "start-year")]
    pub start_year: i32,
    pub data: Vec<f64>,
}

fn default_server() -> String {
    PRODUCTION_SERVER.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl SimulatorProfile {
    pub fn new(ecl_key: &str) -> Self {
        Self {
            ecl_key: ecl_key.to_string(),
            start_date: None,
            start_year: None,
            end_year: None,
            mult: None,
            glob_mult: None,
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_start_year(mut self, start_year: i32) -> Self {
        self.start_year = Some(start_year);
        self
    }

    pub fn with_end_year(mut self, end_year: i32) -> Self {
        self.end_year = Some(end_year);
        self
    }

    pub fn with_mult(mut self, mult: Vec<f64>) -> Self {
        self.mult = Some(mult);
        self
    }

    pub fn with_glob_mult(mut self, glob_mult: f64) -> Self {
        self.glob_mult = Some(glob_mult);
        self
    }

    /// start_date 優先；否則由已棄用的 start_year 推出當年 1 月 1 日
    pub fn requested_start(&self) -> Result<Option<NaiveDate>> {
        match (self.start_date, self.start_year) {
            (Some(_), Some(_)) => Err(SteaError::ConfigValidationError {
                field: "start_year".to_string(),
                message: "Do not provide both start_year and start_date".to_string(),
            }),
            (Some(date), None) => Ok(Some(date)),
            (None, Some(year)) => NaiveDate::from_ymd_opt(year, 1, 1).map(Some).ok_or_else(|| {
                SteaError::InvalidConfigValueError {
                    field: "start_year".to_string(),
                    value: year.to_string(),
                    reason: "Year out of range".to_string(),
                }
            }),
            (None, None) => Ok(None),
        }
    }

    pub fn multipliers(&self) -> &[f64] {
        self.mult.as_deref().unwrap_or(&[1.0])
    }

    pub fn global_multiplier(&self) -> f64 {
        self.glob_mult.unwrap_or(1.0)
    }
}

impl SteaConfig {
    /// 讀取、套用 case 覆寫並驗證設定檔
    pub fn load<P: AsRef<Path>>(path: P, ecl_case: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(SteaError::IoError)?;

        let mut config = Self::from_toml_str(&content)
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
            .map_err(|e| SteaError::ConfigError {
                message: format!("Could not load config file: {}, error: {}", path.display(), e),
            })?;

        if let Some(case) = ecl_case {
            tracing::info!("🔧 ecl_case overridden to: {}", case);
            config.ecl_case = Some(case.to_string());
        }

        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SteaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STEA_SERVER})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SteaError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 送給伺服器的 ConfigurationDate 格式
    pub fn config_date_string(&self) -> String {
        format_config_date(&self.config_date)
    }
}

impl Validate for SteaConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("stea_server", &self.stea_server)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_list("results", &self.results)?;
        for key in &self.results {
            validation::validate_non_empty_string("results", key)?;
        }

        validation::validate_non_empty_list(
            "ecl_profiles",
            &self.ecl_profiles.keys().collect::<Vec<_>>(),
        )?;
        for (profile_id, profile) in &self.ecl_profiles {
            validation::validate_non_empty_string(
                &format!("ecl_profiles.{}.ecl_key", profile_id),
                &profile.ecl_key,
            )?;
            validation::validate_exclusive(
                &format!("ecl_profiles.{}", profile_id),
                &profile.start_year,
                &profile.start_date,
                "Do not provide both start_year and start_date",
            )?;
            if let Some(mult) = &profile.mult {
                let field = format!("ecl_profiles.{}.mult", profile_id);
                validation::validate_non_empty_list(&field, mult)?;
                validation::validate_finite_values(&field, mult)?;
            }
            if let Some(glob_mult) = profile.glob_mult {
                validation::validate_finite_values(
                    &format!("ecl_profiles.{}.glob_mult", profile_id),
                    &[glob_mult],
                )?;
            }
        }

        for (profile_id, profile) in &self.profiles {
            let field = format!("profiles.{}.data", profile_id);
            validation::validate_non_empty_list(&field, &profile.data)?;
            validation::validate_finite_values(&field, &profile.data)?;
        }

        if let Some(case) = &self.ecl_case {
            validation::validate_path("ecl_case", case)?;
        }

        Ok(())
    }
}

pub fn format_config_date(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_date(text).and_then(|date| date.and_hms_opt(0, 0, 0)))
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// TOML 原生日期與字串日期都接受
fn date_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(text) => Ok(text),
        toml::Value::Datetime(datetime) => Ok(datetime.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a date, found {}",
            other.type_str()
        ))),
    }
}

fn de_datetime<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let text = date_text(deserializer)?;
    parse_datetime(&text)
        .ok_or_else(|| D::Error::custom(format!("invalid date or timestamp: {}", text)))
}

fn de_opt_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let text = date_text(deserializer)?;
    parse_date(&text)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("invalid date (YYYY-MM-DD): {}", text)))
}
