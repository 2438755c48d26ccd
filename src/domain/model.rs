use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stea 的 AlternativeId / AlternativeVersion，伺服器可能回傳數字或字串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Number(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

/// 專案中已知的 profile 及其單位/倍數設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDescriptor {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Unit", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "Multiple", default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 其他伺服器欄位原樣保留，寫回 response 檔案時使用
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProfileDescriptor {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            unit: None,
            multiple: None,
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_multiple(mut self, multiple: &str) -> Self {
        self.multiple = Some(multiple.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// GET .../summary 的回應內容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectSummary {
    pub alternative_id: Identifier,
    pub alternative_version: Identifier,
    #[serde(default)]
    pub profiles: Vec<ProfileDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileData {
    pub data: Vec<f64>,
    pub start_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileAdjustment {
    pub id: String,
    pub data: ProfileData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Adjustments {
    pub profiles: Vec<ProfileAdjustment>,
}

/// POST /api/v1/Calculate/ 的 payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalculationRequest {
    pub alternative_id: Identifier,
    pub alternative_version: Identifier,
    pub configuration_date: String,
    pub results: Vec<String>,
    pub adjustments: Adjustments,
}

/// 由時間序列萃取出的年度 profile
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedProfile {
    pub profile_id: String,
    pub start_year: i32,
    pub values: Vec<f64>,
}

impl ExtractedProfile {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxMode {
    Pretax,
    Corporate,
}

impl TaxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxMode::Pretax => "Pretax",
            TaxMode::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValues {
    pub tax_mode: String,
    pub values: BTreeMap<String, serde_json::Value>,
}

/// Calculate 的回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalculationResult {
    pub key_values: Vec<KeyValues>,
}
