use anyhow::Result;
use httpmock::prelude::*;
use pos_tracker_client::config::toml_config::{DownloadsConfig, ServerConfig};
use pos_tracker_client::{
    run_with_config, ClientError, Command, LocalStorage, LocationsApi, LocationsClient,
    OutputFormat, TomlConfig, UploadFile,
};
use serde_json::json;
use tempfile::TempDir;

fn config_for(server: &MockServer, download_dir: &str) -> TomlConfig {
    TomlConfig {
        server: ServerConfig {
            base_url: server.base_url(),
            timeout_seconds: Some(5),
        },
        downloads: DownloadsConfig {
            directory: download_dir.to_string(),
        },
    }
}

#[tokio::test]
async fn test_location_lifecycle_against_mock_server() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/locations")
                .header("content-type", "application/json")
                .json_body(json!({"postOfficeName": "Kurnool HO", "city": "Kurnool"}));
            then.status(201).json_body(json!({
                "id": 7,
                "slNo": 7,
                "postOfficeName": "Kurnool HO",
                "city": "Kurnool",
                "installationStatus": "Pending"
            }));
        })
        .await;

    let update_mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/locations/7")
                .json_body(json!({"installationStatus": "Installed"}));
            then.status(200).json_body(json!({
                "id": 7,
                "slNo": 7,
                "postOfficeName": "Kurnool HO",
                "installationStatus": "Installed"
            }));
        })
        .await;

    let delete_mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/locations/7");
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let client = LocationsClient::new(&server.base_url(), storage).unwrap();

    let created = client
        .create_location(&json!({"postOfficeName": "Kurnool HO", "city": "Kurnool"}))
        .await
        .unwrap();
    assert_eq!(created["id"], 7);

    let updated = client
        .update_location(7, &json!({"installationStatus": "Installed"}))
        .await
        .unwrap();
    assert_eq!(updated["installationStatus"], "Installed");

    let deleted = client.delete_location(7).await.unwrap();
    assert_eq!(deleted, json!({"ok": true}));

    create_mock.assert_async().await;
    update_mock.assert_async().await;
    delete_mock.assert_async().await;
}

#[tokio::test]
async fn test_backup_then_restore_round_trip_through_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let download_dir = temp_dir.path().join("downloads");
    let server = MockServer::start_async().await;

    let backup_body = r#"{"locations": [{"id": 1, "slNo": 1}], "backupDate": "2024-06-01T00:00:00"}"#;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/backup");
            then.status(200)
                .header("content-type", "application/json")
                .header(
                    "content-disposition",
                    "attachment; filename=POS_Backup_2024-06-01.json",
                )
                .body(backup_body);
        })
        .await;

    let restore_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/restore")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"POS_Backup_2024-06-01.json\"")
                .body_contains("\"backupDate\"");
            then.status(200).json_body(json!({"ok": true, "restored": 1}));
        })
        .await;

    let config = config_for(&server, download_dir.to_str().unwrap());

    // 先下載備份到磁碟
    let output = run_with_config(&config, Command::Backup).await?;
    let saved_path = download_dir.join("POS_Backup_2024-06-01.json");
    assert!(output.contains("POS_Backup_2024-06-01.json"));
    assert_eq!(std::fs::read_to_string(&saved_path)?, backup_body);

    // 再用同一個檔案還原
    let output = run_with_config(&config, Command::Restore { path: saved_path }).await?;
    restore_mock.assert_async().await;
    assert!(output.contains("\"restored\": 1"));

    Ok(())
}

#[tokio::test]
async fn test_export_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let download_dir = temp_dir.path().join("downloads");
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/export");
            then.status(500).json_body(json!({"error": "openpyxl missing"}));
        })
        .await;

    let config = config_for(&server, download_dir.to_str().unwrap());
    let output = run_with_config(&config, Command::Export).await.unwrap();

    assert!(output.starts_with("Export not downloaded"));
    assert!(!download_dir.exists());
}

#[tokio::test]
async fn test_list_as_csv() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/locations");
            then.status(200).json_body(json!([
                {"id": 1, "slNo": 1, "division": "Kurnool", "postOfficeName": "Adoni HO"},
                {"id": 2, "slNo": 2, "division": "Kurnool", "postOfficeName": "Dhone SO"}
            ]));
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let output = run_with_config(
        &config,
        Command::List {
            format: OutputFormat::Csv,
        },
    )
    .await
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,1,Kurnool,Adoni HO"));
    assert!(lines[2].starts_with("2,2,Kurnool,Dhone SO"));
}

#[tokio::test]
async fn test_import_with_json_error_resolves() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/import");
            then.status(400).json_body(json!({"error": "No data rows found"}));
        })
        .await;

    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let client = LocationsClient::new(&server.base_url(), storage).unwrap();

    let result = client
        .import_excel(UploadFile::new("empty.xlsx", Vec::new()))
        .await
        .unwrap();
    assert_eq!(result, json!({"error": "No data rows found"}));
}

#[tokio::test]
async fn test_invalid_config_fails_before_any_request() {
    let config = TomlConfig {
        server: ServerConfig {
            base_url: "ftp://example.com".to_string(),
            timeout_seconds: None,
        },
        downloads: DownloadsConfig::default(),
    };

    let err = run_with_config(&config, Command::Health).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidConfigValueError { .. }));
}
