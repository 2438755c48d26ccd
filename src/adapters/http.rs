use crate::config::{format_config_date, SteaConfig};
use crate::domain::model::{CalculationRequest, CalculationResult, ProjectSummary};
use crate::domain::ports::SteaApi;
use crate::utils::error::{Result, SteaError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Stea 伺服器的 HTTP 客戶端
pub struct SteaClient {
    server: String,
    client: Client,
}

impl SteaClient {
    pub fn new(server: &str) -> Result<Self> {
        Self::with_options(server, DEFAULT_TIMEOUT, false)
    }

    pub fn from_config(config: &SteaConfig) -> Result<Self> {
        Self::with_options(
            &config.stea_server,
            Duration::from_secs(config.timeout_seconds),
            config.accept_invalid_certs,
        )
    }

    pub fn with_options(
        server: &str,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self> {
        if accept_invalid_certs {
            tracing::warn!("🔓 TLS certificate verification disabled for {}", server);
        }

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn project_url(
        &self,
        project_id: i64,
        project_version: i64,
        config_date: &NaiveDateTime,
    ) -> String {
        format!(
            "{}/api/v1/Alternative/{}/{}/summary?ConfigurationDate={}",
            self.server,
            project_id,
            project_version,
            format_config_date(config_date)
        )
    }

    pub fn calculate_url(&self) -> String {
        format!("{}/api/v1/Calculate/", self.server)
    }

    async fn read_json<T: DeserializeOwned>(
        method: &str,
        url: &str,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(SteaError::ApiStatusError {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SteaApi for SteaClient {
    async fn get_project(
        &self,
        project_id: i64,
        project_version: i64,
        config_date: NaiveDateTime,
    ) -> Result<ProjectSummary> {
        let url = self.project_url(project_id, project_version, &config_date);
        tracing::info!("🌐 Fetching project summary: {}", url);

        let response = self.client.get(&url).send().await?;
        let summary: ProjectSummary = Self::read_json("GET", &url, response).await?;

        tracing::info!(
            "📋 Project {}/{} has {} profiles",
            summary.alternative_id,
            summary.alternative_version,
            summary.profiles.len()
        );
        Ok(summary)
    }

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        let url = self.calculate_url();
        tracing::info!("🚀 Posting calculation request to: {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        Self::read_json("POST", &url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Adjustments, Identifier};
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_date() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2018, 11, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_urls() {
        let client = SteaClient::new("https://stea.example.com:1700/").unwrap();
        assert_eq!(
            client.project_url(56892, 1, &config_date()),
            "https://stea.example.com:1700/api/v1/Alternative/56892/1/summary?ConfigurationDate=2018-11-01T00:00:00"
        );
        assert_eq!(
            client.calculate_url(),
            "https://stea.example.com:1700/api/v1/Calculate/"
        );
    }

    #[tokio::test]
    async fn test_get_project() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/foobar/api/v1/Alternative/56892/1/summary")
                .query_param("ConfigurationDate", "2018-11-01T00:00:00");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "AlternativeId": 56892,
                    "AlternativeVersion": 1,
                    "Profiles": [{"Id": "FOPT", "Unit": "SM3"}]
                }));
        });

        let client = SteaClient::new(&server.url("/foobar")).unwrap();
        let summary = client.get_project(56892, 1, config_date()).await.unwrap();

        api_mock.assert();
        assert_eq!(summary.alternative_id, Identifier::Number(56892));
        assert_eq!(summary.profiles[0].unit.as_deref(), Some("SM3"));
    }

    #[tokio::test]
    async fn test_get_project_failure_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/Alternative/1/1/summary");
            then.status(404).body("no such alternative");
        });

        let client = SteaClient::new(&server.base_url()).unwrap();
        let err = client.get_project(1, 1, config_date()).await.unwrap_err();

        api_mock.assert();
        match err {
            SteaError::ApiStatusError { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such alternative");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_calculate_posts_payload() {
        let server = MockServer::start();
        let request = CalculationRequest {
            alternative_id: Identifier::Number(1),
            alternative_version: Identifier::Number(1),
            configuration_date: "2018-11-01T00:00:00".to_string(),
            results: vec!["NPV".to_string()],
            adjustments: Adjustments::default(),
        };

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/Calculate/")
                .json_body(json!({
                    "AlternativeId": 1,
                    "AlternativeVersion": 1,
                    "ConfigurationDate": "2018-11-01T00:00:00",
                    "Results": ["NPV"],
                    "Adjustments": {"Profiles": []}
                }));
            then.status(200).json_body(json!({
                "KeyValues": [{"TaxMode": "Corporate", "Values": {"NPV": 30}}]
            }));
        });

        let client = SteaClient::new(&server.base_url()).unwrap();
        let result = client.calculate(&request).await.unwrap();

        api_mock.assert();
        assert_eq!(result.key_values[0].tax_mode, "Corporate");
        assert_eq!(result.key_values[0].values["NPV"], json!(30));
    }
}
