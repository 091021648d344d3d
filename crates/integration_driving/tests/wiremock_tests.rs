//! Integration tests for the driving client (wiremock-based)

use domain::GeoLocation;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_driving::{DrivingClient, DrivingConfig, DrivingError, KakaoDrivingClient};

fn config_for_mock(base_url: &str) -> DrivingConfig {
    DrivingConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        ..DrivingConfig::default()
    }
}

fn origin() -> GeoLocation {
    GeoLocation::from_xy(127.0, 37.5)
}

fn destination() -> GeoLocation {
    GeoLocation::from_xy(126.9779, 37.5663)
}

const fn sample_directions_json() -> &'static str {
    r#"{
        "trans_id": "018e1a2b",
        "routes": [{
            "result_code": 0,
            "result_msg": "길찾기 성공",
            "summary": { "distance": 8250, "duration": 930 }
        }]
    }"#
}

#[tokio::test]
async fn test_driving_duration_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .and(query_param("origin", "127,37.5"))
        .and(query_param("destination", "126.9779,37.5663"))
        .and(query_param("priority", "RECOMMEND"))
        .and(header("Authorization", "KakaoAK test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = KakaoDrivingClient::new(&config_for_mock(&server.uri())).unwrap();
    let duration = client
        .driving_duration(&origin(), &destination())
        .await
        .unwrap();

    assert_eq!(duration, 930);
}

#[tokio::test]
async fn test_non_zero_result_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "routes": [{ "result_code": 104, "result_msg": "출발지와 도착지가 너무 가까움" }] }"#,
        ))
        .mount(&server)
        .await;

    let client = KakaoDrivingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(result, Err(DrivingError::RouteFailed { code: 104, .. })));
}

#[tokio::test]
async fn test_empty_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "routes": [] }"#))
        .mount(&server)
        .await;

    let client = KakaoDrivingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(result, Err(DrivingError::NoRoutesFound)));
}

#[tokio::test]
async fn test_missing_duration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "routes": [{ "result_code": 0, "result_msg": "ok", "summary": { "distance": 100 } }] }"#,
        ))
        .mount(&server)
        .await;

    let client = KakaoDrivingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(result, Err(DrivingError::DurationUnavailable)));
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = KakaoDrivingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(result, Err(DrivingError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = KakaoDrivingClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(result, Err(DrivingError::RequestFailed(_))));
}

#[tokio::test]
async fn test_missing_api_key_skips_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = DrivingConfig {
        api_key: None,
        ..config_for_mock(&server.uri())
    };
    let client = KakaoDrivingClient::new(&config).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(result, Err(DrivingError::MissingApiKey)));
}

#[tokio::test]
async fn test_connection_refused() {
    let client = KakaoDrivingClient::new(&config_for_mock("http://127.0.0.1:1")).unwrap();
    let result = client.driving_duration(&origin(), &destination()).await;

    assert!(matches!(
        result,
        Err(DrivingError::ConnectionFailed(_) | DrivingError::Timeout { .. })
    ));
}
