//! End-to-end tests: presentation service over both adapters and mock servers

use std::sync::Arc;

use application::ports::{DrawingSurfacePort, RouteProviderPort};
use application::{PresentationConfig, RoutePresentationService, TransitOutcome};
use domain::geometry::WalkingPolicy;
use domain::{Coordinate, RouteError, RouteQuery, TravelMode};
use infrastructure::{DrivingRouteAdapter, TracingDrawingSurface, TransitRouteAdapter};
use integration_driving::DrivingConfig;
use integration_transit::TransitConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DRIVING_JSON: &str = r#"{
    "routes": [{
        "result_code": 0,
        "result_msg": "길찾기 성공",
        "sections": [{
            "distance": 6200,
            "duration": 720,
            "roads": [
                { "vertexes": [126.978, 37.5665, 126.99, 37.55] },
                { "vertexes": [127.0, 37.52, 127.03, 37.5] }
            ]
        }]
    }]
}"#;

const TRANSIT_JSON: &str = r##"{
    "routes": [{
        "legs": [{
            "duration": "480s",
            "distanceMeters": 4100,
            "steps": [
                { "travelMode": "WALK",
                  "startLocation": { "latLng": { "latitude": 37.5665, "longitude": 126.978 } },
                  "endLocation": { "latLng": { "latitude": 37.5674, "longitude": 126.978 } } },
                { "travelMode": "TRANSIT",
                  "polyline": { "encodedPolyline": "_p~iF~ps|U_ulLnnqC" },
                  "staticDuration": "480s",
                  "transitDetails": {
                    "stopDetails": {
                        "departureStop": { "name": "시청",
                            "location": { "latLng": { "latitude": 37.5674, "longitude": 126.978 } } },
                        "arrivalStop": { "name": "강남",
                            "location": { "latLng": { "latitude": 37.50045, "longitude": 127.03 } } }
                    },
                    "localizedValues": {
                        "departureTime": { "time": { "text": "오후 3:10" } },
                        "arrivalTime": { "time": { "text": "오후 3:18" } }
                    },
                    "transitLine": { "name": "수도권 2호선", "nameShort": "2호선",
                                     "color": "#33a23d", "vehicle": { "type": "SUBWAY" } },
                    "stopCount": 6 } },
                { "travelMode": "WALK",
                  "startLocation": { "latLng": { "latitude": 37.50045, "longitude": 127.03 } },
                  "endLocation": { "latLng": { "latitude": 37.5, "longitude": 127.03 } } }
            ]
        }]
    }]
}"##;

fn query() -> RouteQuery {
    RouteQuery::new(
        Coordinate::new(37.5665, 126.978).unwrap(),
        Coordinate::new(37.5, 127.03).unwrap(),
        "강남세브란스병원",
    )
}

async fn mount_driving(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/directions"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_transit(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/directions/v2:computeRoutes"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

fn service(
    driving: &MockServer,
    transit: &MockServer,
) -> (RoutePresentationService, Arc<TracingDrawingSurface>) {
    let surface = Arc::new(TracingDrawingSurface::new());
    let driving: Arc<dyn RouteProviderPort> = Arc::new(DrivingRouteAdapter::from_config(
        &DrivingConfig::for_testing(driving.uri()),
    ));
    let transit: Arc<dyn RouteProviderPort> = Arc::new(TransitRouteAdapter::from_config(
        &TransitConfig::for_testing(transit.uri()),
        WalkingPolicy::default(),
    ));
    let service = RoutePresentationService::new(
        driving,
        transit,
        Arc::clone(&surface) as Arc<dyn DrawingSurfacePort>,
        PresentationConfig::for_testing(),
    );
    (service, surface)
}

#[tokio::test]
async fn driving_then_transit_end_to_end() {
    let driving_server = MockServer::start().await;
    let transit_server = MockServer::start().await;
    mount_driving(&driving_server, 200, DRIVING_JSON).await;
    mount_transit(&transit_server, 200, TRANSIT_JSON).await;
    let (service, surface) = service(&driving_server, &transit_server);

    let pending = service.select(query()).await;
    assert_eq!(service.status_line(), "🚗 6.2km / 약 12분");

    // Driving polyline shown, nothing else visible yet
    let snapshot = surface.snapshot();
    assert_eq!(snapshot.visible_polylines().count(), 1);
    assert_eq!(snapshot.visible_markers().count(), 0);
    assert!(snapshot.last_bounds.is_some());

    assert_eq!(pending.wait().await, TransitOutcome::Applied);

    let state = service.snapshot();
    let transit = state.plan(TravelMode::Transit).unwrap();
    assert_eq!(transit.duration_min, 8);
    assert_eq!(transit.walking_minutes, 3);
    assert!(transit.is_estimated);
    assert_eq!(transit.transfer_count, 0);
    assert_eq!(transit.legs.len(), 3);
    // Transit artifacts exist but stay hidden while driving is shown
    assert_eq!(surface.snapshot().visible_polylines().count(), 1);

    service.switch_mode(TravelMode::Transit).unwrap();
    assert_eq!(
        service.status_line(),
        "🚌 지하철 2호선 / 약 8분 (도보 약 3분, 환승 0회)"
    );

    let snapshot = surface.snapshot();
    assert_eq!(snapshot.visible_polylines().count(), 3);
    assert_eq!(snapshot.visible_markers().count(), 2);

    let markers = service.visible_markers();
    assert!(service.on_marker_click(markers[0]));
    assert!(service.on_marker_click(markers[1]));
    let snapshot = surface.snapshot();
    assert_eq!(snapshot.open_bubbles, 1);
    let bubble = snapshot
        .markers
        .iter()
        .find_map(|m| m.bubble.as_deref())
        .unwrap();
    assert!(bubble.contains("강남"));

    service.switch_mode(TravelMode::Car).unwrap();
    let snapshot = surface.snapshot();
    assert_eq!(snapshot.visible_polylines().count(), 1);
    assert_eq!(snapshot.visible_markers().count(), 0);
    assert_eq!(snapshot.open_bubbles, 0);

    service.deselect();
    let snapshot = surface.snapshot();
    assert!(snapshot.polylines.is_empty());
    assert!(snapshot.markers.is_empty());
    assert_eq!(service.status_line(), "선택된 병원이 없습니다");
}

#[tokio::test]
async fn transit_failure_keeps_driving() {
    let driving_server = MockServer::start().await;
    let transit_server = MockServer::start().await;
    mount_driving(&driving_server, 200, DRIVING_JSON).await;
    mount_transit(&transit_server, 503, "unavailable").await;
    let (service, _surface) = service(&driving_server, &transit_server);

    let pending = service.select(query()).await;
    assert_eq!(pending.wait().await, TransitOutcome::Applied);

    let state = service.snapshot();
    assert!(matches!(
        state.result(TravelMode::Transit),
        Some(Err(RouteError::Upstream(_)))
    ));
    assert!(service.switch_mode(TravelMode::Transit).is_err());
    assert_eq!(state.active_mode, TravelMode::Car);
    assert_eq!(service.status_line(), "🚗 6.2km / 약 12분");
}

#[tokio::test]
async fn driving_failure_is_reported() {
    let driving_server = MockServer::start().await;
    let transit_server = MockServer::start().await;
    mount_driving(&driving_server, 401, "unauthorized").await;
    mount_transit(&transit_server, 200, TRANSIT_JSON).await;
    let (service, surface) = service(&driving_server, &transit_server);

    let pending = service.select(query()).await;
    assert_eq!(
        service.status_line(),
        "자동차 경로 검색에 실패했습니다. 병원을 다시 선택해 주세요."
    );
    assert_eq!(surface.snapshot().visible_polylines().count(), 0);

    pending.wait().await;
    service.switch_mode(TravelMode::Transit).unwrap();
    assert!(service.status_line().starts_with("🚌 지하철 2호선"));
}

#[tokio::test]
async fn rejected_requests_with_key_are_upstream_errors() {
    let server = MockServer::start().await;
    mount_driving(&server, 400, "bad request").await;
    mount_transit(&server, 400, "bad request").await;
    let driving = DrivingRouteAdapter::from_config(&DrivingConfig::for_testing(server.uri()));
    let transit = TransitRouteAdapter::from_config(
        &TransitConfig::for_testing(server.uri()),
        WalkingPolicy::default(),
    );

    let driving_err = driving.fetch_route(&query()).await.unwrap_err();
    let transit_err = transit.fetch_route(&query()).await.unwrap_err();
    assert!(matches!(driving_err, RouteError::Upstream(_)));
    assert!(matches!(transit_err, RouteError::Upstream(_)));
    assert!(driving_err.is_retryable());
    assert!(transit_err.is_retryable());
    assert_eq!(
        transit_err.user_message(TravelMode::Transit),
        "대중교통 경로 검색에 실패했습니다. 병원을 다시 선택해 주세요."
    );
}

#[tokio::test]
async fn rejected_credentials_are_upstream_errors() {
    let server = MockServer::start().await;
    mount_driving(&server, 401, "unauthorized").await;
    mount_transit(&server, 403, "forbidden").await;
    let driving = DrivingRouteAdapter::from_config(&DrivingConfig::for_testing(server.uri()));
    let transit = TransitRouteAdapter::from_config(
        &TransitConfig::for_testing(server.uri()),
        WalkingPolicy::default(),
    );

    assert!(matches!(
        driving.fetch_route(&query()).await,
        Err(RouteError::Upstream(_))
    ));
    assert!(matches!(
        transit.fetch_route(&query()).await,
        Err(RouteError::Upstream(_))
    ));
}

#[tokio::test]
async fn missing_keys_yield_not_configured() {
    let driving = DrivingRouteAdapter::from_config(&DrivingConfig::default());
    let transit =
        TransitRouteAdapter::from_config(&TransitConfig::default(), WalkingPolicy::default());

    assert!(matches!(
        driving.fetch_route(&query()).await,
        Err(RouteError::NotConfigured(_))
    ));
    assert!(matches!(
        transit.fetch_route(&query()).await,
        Err(RouteError::NotConfigured(_))
    ));
}

#[tokio::test]
async fn empty_transit_response_is_no_route() {
    let server = MockServer::start().await;
    mount_transit(&server, 200, "{}").await;
    let transit = TransitRouteAdapter::from_config(
        &TransitConfig::for_testing(server.uri()),
        WalkingPolicy::default(),
    );

    let err = transit.fetch_route(&query()).await.unwrap_err();
    assert!(matches!(err, RouteError::NoRouteFound(_)));
    assert_eq!(
        err.user_message(TravelMode::Transit),
        "대중교통 경로를 찾을 수 없습니다."
    );
}
