//! Driving adapter - Implements RouteProviderPort using integration_driving

use std::sync::Arc;

use application::ports::RouteProviderPort;
use async_trait::async_trait;
use domain::{RouteError, RoutePlan, RouteQuery, RouteResult, TravelMode};
use integration_driving::{DrivingClient, DrivingConfig, KakaoDrivingClient};
use tracing::{debug, instrument, warn};

use super::error_mapping::driving_route_error;

/// Route provider for car directions
pub struct DrivingRouteAdapter {
    client: Result<Arc<dyn DrivingClient>, String>,
}

impl std::fmt::Debug for DrivingRouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivingRouteAdapter")
            .field("configured", &self.client.is_ok())
            .finish()
    }
}

impl DrivingRouteAdapter {
    /// Create an adapter around an existing client
    #[must_use]
    pub fn new(client: Arc<dyn DrivingClient>) -> Self {
        Self { client: Ok(client) }
    }

    /// Create an adapter that reports every request as not configured
    #[must_use]
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            client: Err(reason.into()),
        }
    }

    /// Build the Kakao client from configuration
    ///
    /// A missing key or a client that cannot be built yields an adapter that
    /// answers [`RouteError::NotConfigured`].
    #[must_use]
    pub fn from_config(config: &DrivingConfig) -> Self {
        match KakaoDrivingClient::new(config) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "Driving directions disabled");
                Self::unconfigured(e.to_string())
            },
        }
    }
}

#[async_trait]
impl RouteProviderPort for DrivingRouteAdapter {
    #[instrument(skip(self, query), fields(destination = %query.destination_label))]
    async fn fetch_route(&self, query: &RouteQuery) -> RouteResult {
        let client = self
            .client
            .as_ref()
            .map_err(|reason| RouteError::NotConfigured(reason.clone()))?;

        let route = client
            .directions(&query.origin, &query.destination)
            .await
            .map_err(|e| {
                warn!(error = %e, "Driving directions failed");
                driving_route_error(e)
            })?;

        debug!(
            distance_m = route.distance_m,
            duration_s = route.duration_s,
            "Driving route received"
        );

        let distance_km = route.distance_km();
        let duration_min = route.duration_minutes();
        Ok(RoutePlan::driving(distance_km, duration_min, route.path))
    }

    fn mode(&self) -> TravelMode {
        TravelMode::Car
    }
}

#[cfg(test)]
mod tests {
    use domain::Coordinate;
    use integration_driving::{DrivingError, DrivingRoute};

    use super::*;

    struct FixedClient(fn() -> Result<DrivingRoute, DrivingError>);

    #[async_trait]
    impl DrivingClient for FixedClient {
        async fn directions(
            &self,
            _origin: &Coordinate,
            _destination: &Coordinate,
        ) -> Result<DrivingRoute, DrivingError> {
            (self.0)()
        }
    }

    fn query() -> RouteQuery {
        RouteQuery::new(
            Coordinate::new_unchecked(37.5665, 126.978),
            Coordinate::new_unchecked(37.5, 127.03),
            "강남병원",
        )
    }

    #[tokio::test]
    async fn converts_route_to_single_leg_plan() {
        let adapter = DrivingRouteAdapter::new(Arc::new(FixedClient(|| {
            Ok(DrivingRoute {
                distance_m: 6200,
                duration_s: 720,
                path: vec![
                    Coordinate::new_unchecked(37.5665, 126.978),
                    Coordinate::new_unchecked(37.5, 127.03),
                ],
                road_count: 1,
            })
        })));

        let plan = adapter.fetch_route(&query()).await.unwrap();
        assert!((plan.distance_km - 6.2).abs() < f64::EPSILON);
        assert_eq!(plan.duration_min, 12);
        assert_eq!(plan.legs.len(), 1);
        assert!(plan.legs[0].vehicle_info.is_none());
        assert_eq!(plan.legs[0].geometry.len(), 2);
        assert!(!plan.is_estimated);
    }

    #[tokio::test]
    async fn unconfigured_adapter_reports_not_configured() {
        let adapter = DrivingRouteAdapter::from_config(&DrivingConfig::default());
        let err = adapter.fetch_route(&query()).await.unwrap_err();
        assert!(matches!(err, RouteError::NotConfigured(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn client_errors_are_folded() {
        let adapter = DrivingRouteAdapter::new(Arc::new(FixedClient(|| {
            Err(DrivingError::ConnectionFailed("refused".to_string()))
        })));
        let err = adapter.fetch_route(&query()).await.unwrap_err();
        assert!(matches!(err, RouteError::Upstream(_)));
        assert_eq!(adapter.mode(), TravelMode::Car);
    }
}
