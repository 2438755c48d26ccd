use crate::core::units::DEFAULT_SCALE;
use crate::domain::model::{Identifier, ProfileDescriptor, ProjectSummary};
use crate::utils::error::{Result, SteaError};
use std::collections::{BTreeMap, HashMap};

/// 從伺服器取回的 Stea 專案，建立後唯讀
#[derive(Debug, Clone)]
pub struct Project {
    project_id: Identifier,
    project_version: Identifier,
    descriptors: Vec<ProfileDescriptor>,
    index: HashMap<String, usize>,
}

impl Project {
    pub fn new(
        project_id: Identifier,
        project_version: Identifier,
        descriptors: Vec<ProfileDescriptor>,
    ) -> Self {
        let index = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| (descriptor.id.clone(), position))
            .collect();

        Self {
            project_id,
            project_version,
            descriptors,
            index,
        }
    }

    pub fn project_id(&self) -> &Identifier {
        &self.project_id
    }

    pub fn project_version(&self) -> &Identifier {
        &self.project_version
    }

    pub fn descriptors(&self) -> &[ProfileDescriptor] {
        &self.descriptors
    }

    pub fn has_profile(&self, profile_id: &str) -> bool {
        self.index.contains_key(profile_id)
    }

    pub fn profile(&self, profile_id: &str) -> Result<&ProfileDescriptor> {
        self.index
            .get(profile_id)
            .map(|&position| &self.descriptors[position])
            .ok_or_else(|| SteaError::UnknownProfile {
                id: profile_id.to_string(),
            })
    }

    pub fn profile_unit(&self, profile_id: &str) -> Result<Option<&str>> {
        Ok(self.profile(profile_id)?.unit.as_deref())
    }

    /// 未宣告 Multiple 時視為 "1"
    pub fn profile_scale(&self, profile_id: &str) -> Result<&str> {
        Ok(self
            .profile(profile_id)?
            .multiple
            .as_deref()
            .unwrap_or(DEFAULT_SCALE))
    }

    /// 設定檔中的名稱可以是 profile id，也可以是 Description 標籤（可能對應多個 id）
    pub fn resolve_profile_ids(&self, name: &str) -> Vec<String> {
        if self.has_profile(name) {
            return vec![name.to_string()];
        }

        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.description.as_deref() == Some(name))
            .map(|descriptor| descriptor.id.clone())
            .collect()
    }

    /// 以 id 為 key 的 profile 清單，寫入 response 檔案使用
    pub fn profiles_by_id(&self) -> BTreeMap<&str, &ProfileDescriptor> {
        self.descriptors
            .iter()
            .map(|descriptor| (descriptor.id.as_str(), descriptor))
            .collect()
    }
}

impl From<ProjectSummary> for Project {
    fn from(summary: ProjectSummary) -> Self {
        Project::new(
            summary.alternative_id,
            summary.alternative_version,
            summary.profiles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_project() -> Project {
        Project::new(
            Identifier::from("project-id"),
            Identifier::from("100"),
            vec![
                ProfileDescriptor::new("ID1")
                    .with_unit("unit1")
                    .with_multiple("Mill"),
                ProfileDescriptor::new("ID2").with_unit("unit2"),
            ],
        )
    }

    #[test]
    fn test_project_lookup() {
        let project = mock_project();
        assert!(project.has_profile("ID1"));
        assert!(!project.has_profile("ID0"));

        assert!(project.profile("XYZ_NO_SUCH_PROFILE").is_err());
        assert!(project.profile_unit("XYZ_NO_SUCH_PROFILE").is_err());
        assert!(project.profile_scale("XYZ_NO_SUCH_PROFILE").is_err());

        assert_eq!(project.profile_unit("ID1").unwrap(), Some("unit1"));
        assert_eq!(project.profile_scale("ID1").unwrap(), "Mill");
        assert_eq!(project.profile_scale("ID2").unwrap(), "1");
    }

    #[test]
    fn test_resolve_by_id_wins_over_label() {
        let project = Project::new(
            Identifier::from(1),
            Identifier::from(1),
            vec![
                ProfileDescriptor::new("FOPT"),
                ProfileDescriptor::new("uuid-1").with_description("FOPT"),
            ],
        );
        assert_eq!(project.resolve_profile_ids("FOPT"), vec!["FOPT".to_string()]);
    }

    #[test]
    fn test_resolve_group_label() {
        let project = Project::new(
            Identifier::from(1),
            Identifier::from(1),
            vec![
                ProfileDescriptor::new("uuid-1").with_description("Oil"),
                ProfileDescriptor::new("uuid-2").with_description("Gas"),
                ProfileDescriptor::new("uuid-3").with_description("Oil"),
            ],
        );
        assert_eq!(
            project.resolve_profile_ids("Oil"),
            vec!["uuid-1".to_string(), "uuid-3".to_string()]
        );
        assert!(project.resolve_profile_ids("Water").is_empty());
    }

    #[test]
    fn test_from_summary() {
        let summary = ProjectSummary {
            alternative_id: Identifier::from(4872),
            alternative_version: Identifier::from(3),
            profiles: vec![ProfileDescriptor::new("ID1")],
        };
        let project = Project::from(summary);
        assert_eq!(project.project_id(), &Identifier::Number(4872));
        assert_eq!(project.profiles_by_id().len(), 1);
    }
}
