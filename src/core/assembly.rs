use crate::config::SteaConfig;
use crate::core::project::Project;
use crate::core::request::RequestBuilder;
use crate::domain::model::CalculationRequest;
use crate::domain::ports::TimeSeriesSource;
use crate::utils::error::Result;

/// 依設定檔組出完整的計算請求
///
/// 設定中的名稱先當成 profile id 查找，找不到時再比對 Description，
/// 兩者都沒有對應的 profile 時略過（只記錄警告）。
pub fn make_request(
    config: &SteaConfig,
    project: &Project,
    source: Option<&dyn TimeSeriesSource>,
) -> Result<CalculationRequest> {
    let mut builder = RequestBuilder::new(
        project,
        config.config_date_string(),
        config.results.clone(),
    );
    if let Some(source) = source {
        builder = builder.with_source(source);
    }

    for (name, derived) in &config.ecl_profiles {
        let profile_ids = resolve(project, name);
        for profile_id in &profile_ids {
            builder.add_derived_profile(profile_id, derived)?;
        }
    }

    for (name, profile) in &config.profiles {
        let profile_ids = resolve(project, name);
        for profile_id in &profile_ids {
            builder.add_profile(profile_id, profile.start_year, profile.data.clone())?;
        }
    }

    let request = builder.finalize();
    tracing::info!(
        "🧾 Request for project {}/{} assembled with {} profiles",
        request.alternative_id,
        request.alternative_version,
        request.adjustments.profiles.len()
    );
    Ok(request)
}

fn resolve(project: &Project, name: &str) -> Vec<String> {
    let profile_ids = project.resolve_profile_ids(name);
    match profile_ids.as_slice() {
        [] => tracing::warn!("⚠️ No profile in project matches '{}', skipping", name),
        [single] if single == name => {}
        _ => tracing::info!("🔗 '{}' resolved by Description to {:?}", name, profile_ids),
    }
    profile_ids
}
