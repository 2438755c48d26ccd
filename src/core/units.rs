use crate::utils::error::{Result, SteaError};

pub const BARRELS_PR_SM3: f64 = 6.2898;

/// (專案單位, 來源單位) -> 換算係數
const UNIT_FACTORS: &[(&str, &str, f64)] = &[
    ("Bbl", "SM3", BARRELS_PR_SM3),
    ("Bbl", "Bbl", 1.0),
    ("Sm3", "SM3", 1.0),
    ("SM3", "SM3", 1.0),
    ("Sm3", "Bbl", 1.0 / BARRELS_PR_SM3),
    ("SM3", "Bbl", 1.0 / BARRELS_PR_SM3),
];

const SCALE_FACTORS: &[(&str, f64)] = &[("1", 1.0), ("Mill", 1.0e-6), ("1000 Mill", 1.0e-9)];

pub const DEFAULT_SCALE: &str = "1";

pub struct UnitConverter;

impl UnitConverter {
    /// 查不到的單位組合以 1.0 處理並記錄警告，不中斷計算
    pub fn factor(project_unit: &str, source_unit: &str) -> f64 {
        match Self::lookup(project_unit, source_unit) {
            Some(factor) => factor,
            None => {
                tracing::warn!(
                    "⚠️ Default conversion between {} and {} to 1",
                    project_unit,
                    source_unit
                );
                1.0
            }
        }
    }

    pub fn lookup(project_unit: &str, source_unit: &str) -> Option<f64> {
        UNIT_FACTORS
            .iter()
            .find(|(project, source, _)| *project == project_unit && *source == source_unit)
            .map(|(_, _, factor)| *factor)
    }
}

pub struct ScaleTable;

impl ScaleTable {
    pub fn factor(tag: &str) -> Result<f64> {
        SCALE_FACTORS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| SteaError::UnknownScaleFactor {
                tag: tag.to_string(),
            })
    }

    pub fn tags() -> impl Iterator<Item = &'static str> {
        SCALE_FACTORS.iter().map(|(name, _)| *name)
    }
}
