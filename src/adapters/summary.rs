use crate::domain::ports::{Interval, TimeSeriesSource};
use crate::utils::error::{Result, SteaError};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

const DATE_COLUMN: &str = "DATE";
const UNIT_ROW: &str = "UNIT";

#[derive(Debug, Clone)]
struct SummarySeries {
    unit: String,
    values: Vec<f64>,
}

/// 模擬結果摘要：每個報告日期一列，每個 key 為一欄累計值
///
/// CSV 格式：
/// ```text
/// DATE,FOPT,FGPT
/// UNIT,SM3,SM3
/// 2010-01-01,0,0
/// 2010-01-11,10,10
/// ```
/// 報告日期之間以天數線性內插，超出範圍時取第一筆或最後一筆。
#[derive(Debug, Clone)]
pub struct SummaryCase {
    name: String,
    dates: Vec<NaiveDate>,
    series: BTreeMap<String, SummarySeries>,
}

impl SummaryCase {
    pub fn new(name: &str, dates: Vec<NaiveDate>) -> Result<Self> {
        if dates.is_empty() {
            return Err(SteaError::SourceLoadError {
                case: name.to_string(),
                reason: "case contains no report dates".to_string(),
            });
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SteaError::SourceLoadError {
                case: name.to_string(),
                reason: format!(
                    "report dates must be strictly increasing ({} then {})",
                    pair[0], pair[1]
                ),
            });
        }

        Ok(Self {
            name: name.to_string(),
            dates,
            series: BTreeMap::new(),
        })
    }

    pub fn add_series(&mut self, key: &str, unit: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.dates.len() {
            return Err(SteaError::SourceLoadError {
                case: self.name.clone(),
                reason: format!(
                    "key {} has {} values for {} report dates",
                    key,
                    values.len(),
                    self.dates.len()
                ),
            });
        }

        self.series.insert(
            key.to_string(),
            SummarySeries {
                unit: unit.to_string(),
                values,
            },
        );
        Ok(())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| SteaError::SourceLoadError {
            case: name.clone(),
            reason: e.to_string(),
        })?;

        Self::from_reader(&name, file)
    }

    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let load_error = |reason: String| SteaError::SourceLoadError {
            case: name.to_string(),
            reason,
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| load_error(e.to_string()))?
            .clone();
        match headers.get(0) {
            Some(first) if first.eq_ignore_ascii_case(DATE_COLUMN) => {}
            other => {
                return Err(load_error(format!(
                    "first column must be {}, found {:?}",
                    DATE_COLUMN, other
                )))
            }
        }
        let keys: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut records = csv_reader.records();
        let unit_row = records
            .next()
            .ok_or_else(|| load_error("missing UNIT row".to_string()))?
            .map_err(|e| load_error(e.to_string()))?;
        if !unit_row
            .get(0)
            .map(|cell| cell.eq_ignore_ascii_case(UNIT_ROW))
            .unwrap_or(false)
        {
            return Err(load_error("second row must start with UNIT".to_string()));
        }
        let units: Vec<String> = unit_row.iter().skip(1).map(str::to_string).collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); keys.len()];
        for (row, record) in records.enumerate() {
            let record = record.map_err(|e| load_error(e.to_string()))?;
            let date_cell = record.get(0).unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|e| {
                load_error(format!("row {}: invalid date '{}': {}", row + 3, date_cell, e))
            })?;
            dates.push(date);

            for (column, values) in columns.iter_mut().enumerate() {
                let cell = record.get(column + 1).unwrap_or_default();
                let value: f64 = cell.parse().map_err(|_| {
                    load_error(format!(
                        "row {}: invalid value '{}' for {}",
                        row + 3,
                        cell,
                        keys[column]
                    ))
                })?;
                values.push(value);
            }
        }

        let mut case = Self::new(name, dates)?;
        for ((key, values), unit) in keys.iter().zip(columns).zip(
            units
                .iter()
                .map(String::as_str)
                .chain(std::iter::repeat("")),
        ) {
            case.add_series(key, unit, values)?;
        }

        tracing::debug!(
            "📂 Loaded case {} with {} keys and {} report dates",
            case.name,
            case.series.len(),
            case.dates.len()
        );
        Ok(case)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    fn series(&self, key: &str) -> Result<&SummarySeries> {
        self.series.get(key).ok_or_else(|| SteaError::UnknownSeriesKey {
            key: key.to_string(),
        })
    }

    fn value_at(&self, values: &[f64], date: NaiveDate) -> f64 {
        let after = self.dates.partition_point(|report| *report <= date);
        if after == 0 {
            return values[0];
        }
        if after == self.dates.len() {
            return values[after - 1];
        }

        let (d0, d1) = (self.dates[after - 1], self.dates[after]);
        let (v0, v1) = (values[after - 1], values[after]);
        let span = (d1 - d0).num_days() as f64;
        let offset = (date - d0).num_days() as f64;
        v0 + (v1 - v0) * offset / span
    }
}

impl TimeSeriesSource for SummaryCase {
    fn has_key(&self, key: &str) -> bool {
        self.series.contains_key(key)
    }

    fn unit(&self, key: &str) -> Result<String> {
        Ok(self.series(key)?.unit.clone())
    }

    fn start_date(&self) -> NaiveDate {
        self.dates[0]
    }

    fn end_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    fn cumulative(
        &self,
        key: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<f64>> {
        let series = self.series(key)?;
        Ok(interval
            .checkpoints(start, end)
            .into_iter()
            .map(|date| self.value_at(&series.values, date))
            .collect())
    }
}
