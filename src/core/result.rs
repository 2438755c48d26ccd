use crate::domain::model::{CalculationResult, KeyValues, TaxMode};
use crate::utils::error::{Result, SteaError};
use std::collections::BTreeMap;

impl CalculationResult {
    pub fn key_values_for(&self, tax_mode: TaxMode) -> Result<&KeyValues> {
        self.key_values
            .iter()
            .find(|entry| entry.tax_mode == tax_mode.as_str())
            .ok_or_else(|| SteaError::UnknownTaxMode {
                tax_mode: tax_mode.to_string(),
            })
    }

    /// 取出指定稅務模式下所要求的結果
    pub fn results(
        &self,
        tax_mode: TaxMode,
        keys: &[String],
    ) -> Result<BTreeMap<String, serde_json::Value>> {
        let entry = self.key_values_for(tax_mode)?;

        keys.iter()
            .map(|key| {
                entry
                    .values
                    .get(key)
                    .map(|value| (key.clone(), value.clone()))
                    .ok_or_else(|| SteaError::MissingResultKey {
                        key: key.clone(),
                        tax_mode: tax_mode.to_string(),
                    })
            })
            .collect()
    }
}
