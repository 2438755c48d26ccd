use crate::adapters::summary::SummaryCase;
use crate::config::SteaConfig;
use crate::core::assembly::make_request;
use crate::core::project::Project;
use crate::domain::model::{CalculationRequest, TaxMode};
use crate::domain::ports::{SteaApi, Storage, TimeSeriesSource};
use crate::utils::error::Result;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// 一次執行的結果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// 只組出 payload，未送出計算
    DryRun(CalculationRequest),
    Completed {
        results: BTreeMap<String, Value>,
        written: Vec<String>,
    },
}

/// 取得專案、組裝請求、送出計算並寫出結果
pub struct CalculationRunner<A: SteaApi, S: Storage> {
    api: A,
    storage: S,
    config: SteaConfig,
}

impl<A: SteaApi, S: Storage> CalculationRunner<A, S> {
    pub fn new(api: A, storage: S, config: SteaConfig) -> Self {
        Self {
            api,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &SteaConfig {
        &self.config
    }

    pub async fn fetch_project(&self) -> Result<Project> {
        let summary = self
            .api
            .get_project(
                self.config.project_id,
                self.config.project_version,
                self.config.config_date,
            )
            .await?;
        Ok(Project::from(summary))
    }

    pub fn build_request(&self, project: &Project) -> Result<CalculationRequest> {
        let case = match &self.config.ecl_case {
            Some(path) => {
                tracing::info!("📂 Loading summary case: {}", path);
                Some(SummaryCase::from_path(path)?)
            }
            None => None,
        };

        let source = case.as_ref().map(|case| case as &dyn TimeSeriesSource);
        make_request(&self.config, project, source)
    }

    pub async fn run(&self, dry_run: bool, response_file: &str) -> Result<RunOutcome> {
        let project = self.fetch_project().await?;
        let request = self.build_request(&project)?;

        if dry_run {
            tracing::info!("🧪 Dry run, calculation request not submitted");
            return Ok(RunOutcome::DryRun(request));
        }

        let result = self.api.calculate(&request).await?;
        let results = result.results(TaxMode::Corporate, &self.config.results)?;

        let mut written = Vec::with_capacity(results.len() + 1);
        for (key, value) in &results {
            let path = format!("{}_0", key);
            let line = format!("{}\n", value_text(value));
            self.storage.write_file(&path, line.as_bytes()).await?;
            tracing::info!("📝 {} = {}", key, value_text(value));
            written.push(path);
        }

        let response = json!({
            "response": result.key_values,
            "profiles": project.profiles_by_id(),
        });
        let body = serde_json::to_vec_pretty(&response)?;
        self.storage.write_file(response_file, &body).await?;
        written.push(response_file.to_string());

        Ok(RunOutcome::Completed { results, written })
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
