use crate::config::SimulatorProfile;
use crate::core::extractor::ProfileExtractor;
use crate::core::project::Project;
use crate::domain::model::{
    Adjustments, CalculationRequest, ExtractedProfile, ProfileAdjustment, ProfileData,
};
use crate::domain::ports::TimeSeriesSource;
use crate::utils::error::{Result, SteaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Building,
    Finalized,
}

/// 組裝送往 Calculate 的 payload
///
/// 每次 `add_*` 都是原子操作：失敗時 payload 不變。`finalize` 之後只能讀取。
pub struct RequestBuilder<'a> {
    project: &'a Project,
    source: Option<&'a dyn TimeSeriesSource>,
    request: CalculationRequest,
    state: BuilderState,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(project: &'a Project, configuration_date: String, results: Vec<String>) -> Self {
        Self {
            project,
            source: None,
            request: CalculationRequest {
                alternative_id: project.project_id().clone(),
                alternative_version: project.project_version().clone(),
                configuration_date,
                results,
                adjustments: Adjustments::default(),
            },
            state: BuilderState::Building,
        }
    }

    pub fn with_source(mut self, source: &'a dyn TimeSeriesSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn profile_count(&self) -> usize {
        self.request.adjustments.profiles.len()
    }

    pub fn add_profile(&mut self, profile_id: &str, start_year: i32, data: Vec<f64>) -> Result<()> {
        self.ensure_building()?;
        if !self.project.has_profile(profile_id) {
            return Err(SteaError::UnknownProfile {
                id: profile_id.to_string(),
            });
        }

        self.request.adjustments.profiles.push(ProfileAdjustment {
            id: profile_id.to_string(),
            data: ProfileData { data, start_year },
        });
        Ok(())
    }

    pub fn add_extracted_profile(&mut self, profile: ExtractedProfile) -> Result<()> {
        self.add_profile(&profile.profile_id, profile.start_year, profile.values)
    }

    /// 從時間序列來源萃取後加入
    pub fn add_derived_profile(&mut self, profile_id: &str, derived: &SimulatorProfile) -> Result<()> {
        self.ensure_building()?;
        let source = self.source.ok_or(SteaError::MissingSource)?;

        let profile = ProfileExtractor::new(self.project, source).extract(profile_id, derived)?;
        self.add_extracted_profile(profile)
    }

    /// 可重複呼叫，每次回傳相同的 payload
    pub fn finalize(&mut self) -> CalculationRequest {
        if self.state == BuilderState::Building {
            tracing::debug!(
                "🧾 Request finalized with {} profiles",
                self.request.adjustments.profiles.len()
            );
            self.state = BuilderState::Finalized;
        }
        self.request.clone()
    }

    fn ensure_building(&self) -> Result<()> {
        match self.state {
            BuilderState::Building => Ok(()),
            BuilderState::Finalized => Err(SteaError::RequestFinalized),
        }
    }
}
