use crate::config::SimulatorProfile;
use crate::core::project::Project;
use crate::core::units::{ScaleTable, UnitConverter};
use crate::domain::model::ExtractedProfile;
use crate::domain::ports::{Interval, TimeSeriesSource};
use crate::utils::error::{Result, SteaError};
use chrono::{Datelike, NaiveDate};

/// 將累計時間序列轉成指定區間內的年度增量 profile
pub struct ProfileExtractor<'a> {
    project: &'a Project,
    source: &'a dyn TimeSeriesSource,
}

/// 解析後的萃取區間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ExtractionWindow {
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    fn needs_crop(&self, source_start: NaiveDate) -> bool {
        self.start != first_day_of_year(self.start.year()) && self.start > source_start
    }
}

impl<'a> ProfileExtractor<'a> {
    pub fn new(project: &'a Project, source: &'a dyn TimeSeriesSource) -> Self {
        Self { project, source }
    }

    pub fn extract(&self, profile_id: &str, derived: &SimulatorProfile) -> Result<ExtractedProfile> {
        let key = derived.ecl_key.as_str();
        if !self.source.has_key(key) {
            return Err(SteaError::UnknownSeriesKey {
                key: key.to_string(),
            });
        }

        let project_unit = self.project.profile_unit(profile_id)?;
        let scale = self.project.profile_scale(profile_id)?;
        let window = self.window(derived)?;

        let mut data = self.annual_production(key, &window)?;

        let source_unit = self.source.unit(key)?;
        let unit_factor = match project_unit {
            Some(unit) => UnitConverter::factor(unit, &source_unit),
            None => {
                tracing::warn!(
                    "⚠️ Profile {} declares no unit, default conversion from {} to 1",
                    profile_id,
                    source_unit
                );
                1.0
            }
        };
        let conversion = unit_factor * ScaleTable::factor(scale)?;
        data.iter_mut().for_each(|value| *value *= conversion);

        apply_point_multipliers(&mut data, derived.multipliers());

        let global = derived.global_multiplier();
        data.iter_mut().for_each(|value| *value *= global);

        tracing::debug!(
            "📈 {} <- {} [{} .. {}] {} values (conversion {})",
            profile_id,
            key,
            window.start,
            window.end,
            data.len(),
            conversion
        );

        Ok(ExtractedProfile {
            profile_id: profile_id.to_string(),
            start_year: window.start_year(),
            values: data,
        })
    }

    /// 解析起訖日期；起始晚於結束或晚於資料最後一天時回傳錯誤
    pub fn window(&self, derived: &SimulatorProfile) -> Result<ExtractionWindow> {
        let start = derived
            .requested_start()?
            .unwrap_or_else(|| self.source.start_date());

        let end = match derived.end_year {
            Some(year) => last_day_of_year(year)?,
            None => self.source.end_date(),
        };

        let limit = end.min(self.source.end_date());
        if start > limit {
            return Err(SteaError::InvalidTimeInterval { start, end: limit });
        }

        Ok(ExtractionWindow { start, end })
    }

    /// 每年一筆的產量，第一年扣除起始日之前的部分
    fn annual_production(&self, key: &str, window: &ExtractionWindow) -> Result<Vec<f64>> {
        let year_start = first_day_of_year(window.start_year());
        let after_end = first_day_of_year(window.end_year() + 1);

        let cumulative = self
            .source
            .cumulative(key, year_start, after_end, Interval::Annual)?;
        let mut production = increments(&cumulative);

        if window.needs_crop(self.source.start_date()) {
            let before_start = self
                .source
                .cumulative(key, year_start, window.start, Interval::Daily)?;
            let cropped: f64 = increments(&before_start).iter().sum();
            if let Some(first) = production.first_mut() {
                *first -= cropped;
            }
        }

        Ok(production)
    }
}

fn increments(cumulative: &[f64]) -> Vec<f64> {
    cumulative.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// 倍數清單較短時，其餘的值保持不變
pub fn apply_point_multipliers(data: &mut [f64], multipliers: &[f64]) {
    data.iter_mut()
        .zip(multipliers)
        .for_each(|(value, multiplier)| *value *= multiplier);
}

fn first_day_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn last_day_of_year(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| SteaError::InvalidConfigValueError {
        field: "end_year".to_string(),
        value: year.to_string(),
        reason: "Year out of range".to_string(),
    })
}
