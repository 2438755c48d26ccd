use httpmock::prelude::*;
use serde_json::{json, Value};
use std::path::Path;
use stea_client::{
    CalculationRunner, LocalStorage, RunOutcome, SteaClient, SteaConfig, SteaError,
};
use tempfile::TempDir;

/// 2010-01-01 起每 10 天一筆，FOPT 每天累計 1
fn write_case(dir: &Path) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    let mut content = String::from("DATE,FOPT,FGPT\nUNIT,SM3,SM3\n");
    for step in 0..100 {
        let date = start + chrono::Duration::days(step * 10);
        content.push_str(&format!("{},{},{}\n", date, step * 10, step * 20));
    }

    let path = dir.join("CASE.csv");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn write_config(dir: &Path, server: &str, profiles: &str) -> String {
    let content = format!(
        r#"
config_date = "2018-10-10 12:00:00"
project_id = 1234
project_version = 1
results = ["NPV"]
stea_server = "{}"
timeout_seconds = 5
{}
"#,
        server, profiles
    );

    let path = dir.join("stea.toml");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn mock_project(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/Alternative/1234/1/summary")
            .query_param("ConfigurationDate", "2018-10-10T12:00:00");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "AlternativeId": 1234,
                "AlternativeVersion": 1,
                "Profiles": [
                    {"Id": "ID1", "Unit": "Sm3", "Multiple": "Mill", "Name": "Oil"},
                    {"Id": "28558281-b82d", "Unit": "Sm3", "Description": "FGPT"},
                    {"Id": "ID3", "Unit": "NOK"}
                ]
            }));
    })
}

async fn run(
    config_path: &str,
    ecl_case: Option<&str>,
    output: &Path,
    dry_run: bool,
) -> stea_client::Result<RunOutcome> {
    let config = SteaConfig::load(config_path, ecl_case)?;
    let client = SteaClient::from_config(&config)?;
    CalculationRunner::new(client, LocalStorage::new(output), config)
        .run(dry_run, "stea_response.json")
        .await
}

#[tokio::test]
async fn test_end_to_end_calculation() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let case = write_case(temp_dir.path());
    let config = write_config(
        temp_dir.path(),
        &server.base_url(),
        &format!(
            "ecl_case = \"{}\"\n\n[ecl_profiles.ID1]\necl_key = \"FOPT\"\nstart_year = 2011\nend_year = 2013\n\n[profiles.ID3]\nstart_year = 2020\ndata = [1.0, 2.0]\n",
            case
        ),
    );

    let project_mock = mock_project(&server);
    let calculate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/Calculate/")
            .body_contains("\"AlternativeId\":1234")
            .body_contains("\"ConfigurationDate\":\"2018-10-10T12:00:00\"")
            .body_contains("\"Id\":\"ID1\"")
            .body_contains("\"Id\":\"ID3\"");
        then.status(200).json_body(json!({
            "KeyValues": [
                {"TaxMode": "Pretax", "Values": {"NPV": 100}},
                {"TaxMode": "Corporate", "Values": {"NPV": 30}}
            ]
        }));
    });

    let outcome = run(&config, None, temp_dir.path(), false).await.unwrap();

    project_mock.assert();
    calculate_mock.assert();
    assert!(matches!(outcome, RunOutcome::Completed { .. }));

    let npv = std::fs::read_to_string(temp_dir.path().join("NPV_0")).unwrap();
    assert_eq!(npv, "30\n");

    let response: Value = serde_json::from_str(
        &std::fs::read_to_string(temp_dir.path().join("stea_response.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(response["response"].as_array().unwrap().len(), 2);
    assert_eq!(response["profiles"]["ID1"]["Name"], "Oil");
    assert_eq!(response["profiles"]["ID3"]["Unit"], "NOK");
}

#[tokio::test]
async fn test_dry_run_payload() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let case = write_case(temp_dir.path());
    let config = write_config(
        temp_dir.path(),
        &server.base_url(),
        "[ecl_profiles.ID1]\necl_key = \"FOPT\"\nstart_year = 2011\nend_year = 2013\n",
    );

    let project_mock = mock_project(&server);
    let calculate_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/Calculate/");
        then.status(200);
    });

    let outcome = run(&config, Some(&case), temp_dir.path(), true)
        .await
        .unwrap();

    project_mock.assert();
    calculate_mock.assert_hits(0);

    let request = match outcome {
        RunOutcome::DryRun(request) => request,
        other => panic!("unexpected outcome: {:?}", other),
    };
    let profile = &request.adjustments.profiles[0];
    assert_eq!(profile.id, "ID1");
    assert_eq!(profile.data.start_year, 2011);
    assert_eq!(profile.data.data.len(), 3);
    let total: f64 = profile.data.data.iter().sum();
    assert!((total * 1e6 - 625.0).abs() < 1e-6);
    assert!(!temp_dir.path().join("stea_response.json").exists());
}

#[tokio::test]
async fn test_profile_resolved_by_description() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let case = write_case(temp_dir.path());
    let config = write_config(
        temp_dir.path(),
        &server.base_url(),
        "[ecl_profiles.FGPT]\necl_key = \"FGPT\"\nend_year = 2010\n\n[ecl_profiles.NOT_IN_PROJECT]\necl_key = \"FOPT\"\n",
    );

    let _project_mock = mock_project(&server);
    let outcome = run(&config, Some(&case), temp_dir.path(), true)
        .await
        .unwrap();

    let RunOutcome::DryRun(request) = outcome else {
        panic!("expected a dry run");
    };
    assert_eq!(request.adjustments.profiles.len(), 1);
    assert_eq!(request.adjustments.profiles[0].id, "28558281-b82d");
    assert!((request.adjustments.profiles[0].data.data[0] - 730.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_calculate_failure_status() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let config = write_config(
        temp_dir.path(),
        &server.base_url(),
        "[ecl_profiles.UNKNOWN]\necl_key = \"FOPT\"\n",
    );

    let _project_mock = mock_project(&server);
    let calculate_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/Calculate/");
        then.status(500).body("internal error");
    });

    let err = run(&config, None, temp_dir.path(), false).await.unwrap_err();

    calculate_mock.assert();
    match err {
        SteaError::ApiStatusError {
            method,
            status,
            body,
            ..
        } => {
            assert_eq!(method, "POST");
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!temp_dir.path().join("NPV_0").exists());
}

#[tokio::test]
async fn test_missing_case_file() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let config = write_config(
        temp_dir.path(),
        &server.base_url(),
        "[ecl_profiles.ID1]\necl_key = \"FOPT\"\n",
    );

    let _project_mock = mock_project(&server);
    let err = run(&config, Some("/no/such/CASE.csv"), temp_dir.path(), false)
        .await
        .unwrap_err();

    assert!(matches!(err, SteaError::SourceLoadError { .. }));
    assert!(err
        .to_string()
        .contains("Failed to create summary instance from argument"));
}

#[tokio::test]
async fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), "https://stea.example.com", "");

    let err = SteaConfig::load(&config, None).unwrap_err();
    assert!(matches!(err, SteaError::ConfigError { .. }));
    assert!(err.to_string().contains("Could not load config file"));

    let missing = temp_dir.path().join("missing.toml");
    assert!(matches!(
        SteaConfig::load(&missing, None),
        Err(SteaError::IoError(_))
    ));
}
