use crate::domain::model::{CalculationRequest, CalculationResult, ProjectSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Months, NaiveDate, NaiveDateTime};

/// 取樣間隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Annual,
    Daily,
}

impl Interval {
    pub fn step(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Interval::Annual => date.checked_add_months(Months::new(12)),
            Interval::Daily => date.succ_opt(),
        }
    }

    /// 從 `start` 開始每隔一個間隔取一點，直到第一個不早於 `end` 的點為止（含）
    pub fn checkpoints(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut points = vec![start];
        let mut current = start;
        while current < end {
            match self.step(current) {
                Some(next) => {
                    points.push(next);
                    current = next;
                }
                None => break,
            }
        }
        points
    }
}

/// 模擬結果的時間序列來源
pub trait TimeSeriesSource: Send + Sync {
    fn has_key(&self, key: &str) -> bool;

    fn unit(&self, key: &str) -> Result<String>;

    /// 第一個有資料的日期
    fn start_date(&self) -> NaiveDate;

    /// 最後一個有資料的日期
    fn end_date(&self) -> NaiveDate;

    /// 依 `interval` 取樣的累計值，取樣點見 [`Interval::checkpoints`]
    fn cumulative(
        &self,
        key: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<f64>>;
}

/// Stea 遠端服務
#[async_trait]
pub trait SteaApi: Send + Sync {
    async fn get_project(
        &self,
        project_id: i64,
        project_version: i64,
        config_date: NaiveDateTime,
    ) -> Result<ProjectSummary>;

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
