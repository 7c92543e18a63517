use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

use benbot_desktop::api::{ApiError, BackendClient};

#[tokio::test]
async fn chat_success_returns_bot_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/chat")
                .json_body(json!({"message": "bonjour"}));
            then.status(200).json_body(json!({"response": "salut !"}));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let reply = client.send_chat("bonjour".to_string()).await.unwrap();

    assert_eq!(reply, "salut !");
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_non_success_status_maps_to_application_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(400).json_body(json!({"error": "Message vide"}));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let err = client.send_chat("".to_string()).await.unwrap_err();

    assert_eq!(err, ApiError::Application("Message vide".to_string()));
}

#[tokio::test]
async fn chat_error_without_body_field_carries_the_raw_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(500).body("Erreur interne du serveur");
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let err = client.send_chat("x".to_string()).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Application("Erreur interne du serveur".to_string())
    );
}

#[tokio::test]
async fn chat_transport_failure_when_backend_unreachable() {
    let client = BackendClient::new("http://127.0.0.1:9");
    let err = client.send_chat("bonjour".to_string()).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn vpn_test_success_yields_ip_and_method() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/vpn-test");
            then.status(200).json_body(json!({
                "success": true,
                "ip": "93.184.216.34",
                "method": "VPN"
            }));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let report = client.test_vpn().await.unwrap();

    assert_eq!(report.ip, "93.184.216.34");
    assert_eq!(report.method, "VPN");
}

#[tokio::test]
async fn vpn_test_failure_flag_is_an_application_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/vpn-test");
            then.status(200).json_body(json!({"success": false}));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let err = client.test_vpn().await.unwrap_err();

    assert!(matches!(err, ApiError::Application(_)));
}

#[tokio::test]
async fn vpn_test_malformed_body_is_a_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/vpn-test");
            then.status(200).body("not json at all");
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let err = client.test_vpn().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn proxy_listing_carries_entries_and_total_count() {
    let server = MockServer::start_async().await;
    let proxies: Vec<String> = (1..=15).map(|n| format!("10.0.0.{n}:8080")).collect();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/get-proxies");
            then.status(200).json_body(json!({
                "success": true,
                "proxies": proxies,
                "count": 15
            }));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let listing = client.list_proxies().await.unwrap();

    assert_eq!(listing.proxies.len(), 15);
    assert_eq!(listing.count, 15);
}

#[tokio::test]
async fn proxy_listing_failure_carries_the_backend_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/get-proxies");
            then.status(500)
                .json_body(json!({"success": false, "error": "Source indisponible"}));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    let err = client.list_proxies().await.unwrap_err();

    assert_eq!(err, ApiError::Application("Source indisponible".to_string()));
}

#[tokio::test]
async fn health_probe_reports_reachability_without_erroring() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"status": "healthy"}));
        })
        .await;

    let client = BackendClient::new(&server.base_url());
    assert!(client.check_health().await);

    let unreachable = BackendClient::new("http://127.0.0.1:9");
    assert!(!unreachable.check_health().await);
}
