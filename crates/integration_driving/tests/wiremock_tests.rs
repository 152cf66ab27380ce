//! Integration tests for the driving client (wiremock-based)

use domain::value_objects::Coordinate;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_driving::{DrivingClient, DrivingConfig, DrivingError, KakaoDrivingClient};

fn origin() -> Coordinate {
    Coordinate::new(37.5665, 126.978).unwrap()
}

fn destination() -> Coordinate {
    Coordinate::new(37.5, 127.03).unwrap()
}

fn client_for(server: &MockServer) -> KakaoDrivingClient {
    KakaoDrivingClient::new(&DrivingConfig::for_testing(server.uri())).unwrap()
}

const fn sample_directions_json() -> &'static str {
    r#"{
        "trans_id": "018e3d",
        "routes": [{
            "result_code": 0,
            "result_msg": "길찾기 성공",
            "summary": { "distance": 6200, "duration": 720 },
            "sections": [{
                "distance": 6200,
                "duration": 720,
                "roads": [
                    { "name": "세종대로", "distance": 3000, "vertexes": [126.978, 37.5665, 126.99, 37.55] },
                    { "name": "테헤란로", "distance": 3200, "vertexes": [127.0, 37.52, 127.03, 37.5] }
                ]
            }]
        }]
    }"#
}

#[tokio::test]
async fn directions_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .and(query_param("origin", "126.978,37.5665"))
        .and(query_param("destination", "127.03,37.5"))
        .and(query_param("priority", "RECOMMEND"))
        .and(header("Authorization", "KakaoAK test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .expect(1)
        .mount(&server)
        .await;

    let route = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap();

    assert!((route.distance_km() - 6.2).abs() < f64::EPSILON);
    assert_eq!(route.duration_minutes(), 12);
    assert_eq!(route.path.len(), 4);
    assert_eq!(route.road_count, 2);
}

#[tokio::test]
async fn directions_failed_result_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "routes": [{ "result_code": 104, "result_msg": "출발지와 도착지가 5 m 이내" }] }"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap_err();

    assert!(matches!(err, DrivingError::NoRouteFound { code: 104, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn directions_empty_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "routes": [] }"#))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap_err();

    assert!(matches!(err, DrivingError::NoRouteFound { code: -1, .. }));
}

#[tokio::test]
async fn directions_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap_err();

    assert!(matches!(err, DrivingError::RequestFailed(ref msg) if msg.contains("500")));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn directions_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap_err();

    assert!(matches!(err, DrivingError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn directions_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DrivingError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn directions_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .directions(&origin(), &destination())
        .await
        .unwrap_err();

    assert!(matches!(err, DrivingError::ParseError(_)));
}

#[test]
fn missing_key_is_configuration_error() {
    let config = DrivingConfig {
        api_key: None,
        ..DrivingConfig::for_testing("http://localhost")
    };
    assert!(matches!(
        KakaoDrivingClient::new(&config),
        Err(DrivingError::ConfigurationError(_))
    ));
}
