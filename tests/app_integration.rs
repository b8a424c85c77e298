use std::fs;
use std::path::Path;

use fxrates::AppCommand;
use fxrates::core::RateError;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const LIVE_RESPONSE: &str = r#"{
        "success": true,
        "timestamp": 1430401802,
        "source": "USD",
        "quotes": {
            "USDEUR": 0.9,
            "USDGBP": 0.8
        }
    }"#;

    pub async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/live"))
            .and(query_param("access_key", "test-key"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str, precision: i64) -> String {
        let config_path = dir.join("config.yaml");
        let cache_path = dir.join("cache").join("rates.json");
        let config_content = format!(
            r#"
api_key: "test-key"
cache_path: "{}"
precision: {precision}
provider:
  base_url: "{base_url}"
"#,
            cache_path.display()
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path.to_str().unwrap().to_string()
    }
}

fn read_cache(dir: &Path) -> serde_json::Value {
    let contents = fs::read_to_string(dir.join("cache").join("rates.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(200, test_utils::LIVE_RESPONSE).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), 4);

    let result = fxrates::run_command(AppCommand::Refresh, Some(&config_path)).await;
    assert!(result.is_ok(), "Refresh failed with: {:?}", result.err());

    let cached = read_cache(dir.path());
    assert_eq!(cached["USDEUR"], 0.9);
    assert_eq!(cached["USDGBP"], 0.8);

    for command in [
        AppCommand::Rate {
            from: "EUR".to_string(),
            to: "GBP".to_string(),
            precision: None,
        },
        AppCommand::Convert {
            amount: 100.0,
            from: "EUR".to_string(),
            to: "GBP".to_string(),
            precision: Some(2),
        },
        // Unknown currencies still succeed, reporting no rate
        AppCommand::Convert {
            amount: 100.0,
            from: "EUR".to_string(),
            to: "JPY".to_string(),
            precision: None,
        },
        AppCommand::List,
    ] {
        let result = fxrates::run_command(command.clone(), Some(&config_path)).await;
        assert!(
            result.is_ok(),
            "{command:?} failed with: {:?}",
            result.err()
        );
    }

    let result = fxrates::run_command(AppCommand::Clear, Some(&config_path)).await;
    assert!(result.is_ok());
    assert!(!dir.path().join("cache").join("rates.json").exists());

    let result = fxrates::run_command(AppCommand::List, Some(&config_path)).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_rate_from_service_matches_cross_rate() {
    let mock_server = test_utils::create_mock_server(200, test_utils::LIVE_RESPONSE).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), 4);

    let config = fxrates::core::config::AppConfig::load_from_path(&config_path).unwrap();
    let service = fxrates::build_service(&config).unwrap();
    assert_eq!(service.precision(), 4);

    service.fetch_and_store_rates().await.unwrap();
    assert_eq!(service.get_rate("EUR", "GBP", None).await.unwrap(), 0.8889);
    assert_eq!(service.get_rate("USD", "EUR", None).await.unwrap(), 0.9);
    assert_eq!(service.get_rate("EUR", "USD", None).await.unwrap(), 1.1111);
    assert!(matches!(
        service.get_rate("USD", "JPY", None).await,
        Err(RateError::DataFormat(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_refresh_failure_leaves_cache_untouched() {
    let mock_server = test_utils::create_mock_server(500, "").await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), 6);

    let cache_dir = dir.path().join("cache");
    fs::create_dir_all(&cache_dir).unwrap();
    fs::write(cache_dir.join("rates.json"), r#"{"USDCHF": 0.88}"#).unwrap();

    let result = fxrates::run_command(AppCommand::Refresh, Some(&config_path)).await;
    let err = result.expect_err("Refresh should fail on HTTP 500");
    assert!(
        err.chain()
            .any(|cause| matches!(cause.downcast_ref::<RateError>(), Some(RateError::ApiResponse(_))))
    );

    assert_eq!(read_cache(dir.path())["USDCHF"], 0.88);
}

#[test_log::test(tokio::test)]
async fn test_rate_without_cache_is_unavailable() {
    let mock_server = test_utils::create_mock_server(200, test_utils::LIVE_RESPONSE).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), 6);

    let result = fxrates::run_command(
        AppCommand::Rate {
            from: "EUR".to_string(),
            to: "GBP".to_string(),
            precision: None,
        },
        Some(&config_path),
    )
    .await;
    let err = result.expect_err("Rate should fail without cached data");
    assert!(err.chain().any(|cause| matches!(
        cause.downcast_ref::<RateError>(),
        Some(RateError::DataUnavailable(_))
    )));
}

#[test_log::test(tokio::test)]
async fn test_negative_precision_in_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "http://127.0.0.1:1", -2);

    let config = fxrates::core::config::AppConfig::load_from_path(&config_path).unwrap();
    let err = fxrates::build_service(&config).err().expect("should fail");
    assert!(err.to_string().contains("Invalid precision"));
}

#[test_log::test(tokio::test)]
async fn test_refresh_transport_failure_does_not_leak_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "http://127.0.0.1:1", 6);

    let err = fxrates::run_command(AppCommand::Refresh, Some(&config_path))
        .await
        .expect_err("Refresh should fail without a reachable endpoint");
    assert!(err.chain().any(|cause| matches!(
        cause.downcast_ref::<RateError>(),
        Some(RateError::Network(_))
    )));
    // Debug output of anyhow renders the whole cause chain
    assert!(!format!("{err:?}").contains("test-key"));
    assert!(!format!("{err:#}").contains("test-key"));
}
