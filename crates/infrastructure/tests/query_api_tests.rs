//! Integration tests for the query service client against a mock server

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::QueryApiPort;
use infrastructure::HttpQueryApi;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpQueryApi {
    HttpQueryApi::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn meta_parses_station_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "place": "Bangkok",
            "tz": "Asia/Bangkok",
            "now": "2026-08-30T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let meta = client(&server).meta().await.unwrap();
    assert_eq!(meta.place, "Bangkok");
    assert_eq!(meta.tz, "Asia/Bangkok");
}

#[tokio::test]
async fn current_parses_a_reading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/live/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "time_utc": "2026-08-30T12:00:00Z",
            "time_local": "2026-08-30T19:00",
            "air_temperature": 31.5,
            "relative_humidity": 70.0,
            "wind_speed_ms": 2.5,
            "symbol_code": "rain",
            "symbol_emoji": "🌧️"
        })))
        .mount(&server)
        .await;

    let reading = client(&server).current().await.unwrap();
    assert_eq!(reading.air_temperature, Some(31.5));
    assert_eq!(reading.symbol_code.as_deref(), Some("rain"));
    assert_eq!(reading.time_local, "2026-08-30T19:00");
}

#[tokio::test]
async fn recent_passes_window_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/live/recent"))
        .and(query_param("hours", "12"))
        .and(query_param("past", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"time_utc": "2026-08-30T11:00:00Z", "time_local": "18:00"},
            {"time_utc": "2026-08-30T12:00:00Z", "time_local": "19:00"}
        ])))
        .mount(&server)
        .await;

    let readings = client(&server).recent(12, 3).await.unwrap();
    assert_eq!(readings.len(), 2);
    assert!(readings[0].time_utc < readings[1].time_utc);
}

#[tokio::test]
async fn daily_parses_summaries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/live/daily"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2026-08-30", "tmin": 24.0, "tmax": 33.0, "rain": 1.2},
            {"date": "2026-08-31", "tmin": 25.0, "tmax": 34.0, "rain": null}
        ])))
        .mount(&server)
        .await;

    let days = client(&server).daily(7).await.unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].tmax, Some(33.0));
    assert_eq!(days[1].rain, None);
}

#[tokio::test]
async fn server_error_maps_to_external_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meta"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "store unavailable"
        })))
        .mount(&server)
        .await;

    let err = client(&server).meta().await.unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_maps_to_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/live/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).current().await.unwrap_err();
    assert!(matches!(err, ApplicationError::Internal(_)));
}

#[tokio::test]
async fn unreachable_server_is_an_external_service_error() {
    // Port 9 is the discard service; nothing listens there in tests.
    let api = HttpQueryApi::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    let err = api.meta().await.unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(_)));
}
