//! Folding integration errors into the route error taxonomy

use domain::RouteError;
use integration_driving::DrivingError;
use integration_transit::TransitError;

/// Map a driving client error to a route error
pub(super) fn driving_route_error(err: DrivingError) -> RouteError {
    match err {
        DrivingError::ConfigurationError(msg) => RouteError::NotConfigured(msg),
        DrivingError::AuthenticationFailed(msg) => {
            RouteError::Upstream(format!("credential rejected: {msg}"))
        },
        DrivingError::NoRouteFound { code, message } => {
            RouteError::NoRouteFound(format!("result code {code}: {message}"))
        },
        other => RouteError::Upstream(other.to_string()),
    }
}

/// Map a transit client error to a route error
pub(super) fn transit_route_error(err: TransitError) -> RouteError {
    match err {
        TransitError::ConfigurationError(msg) => RouteError::NotConfigured(msg),
        TransitError::AuthenticationFailed(msg) => {
            RouteError::Upstream(format!("credential rejected: {msg}"))
        },
        TransitError::InvalidRequest(msg) => {
            RouteError::Upstream(format!("check the API key and Routes API settings: {msg}"))
        },
        err @ TransitError::NoRoutesFound { .. } => RouteError::NoRouteFound(err.to_string()),
        other => RouteError::Upstream(other.to_string()),
    }
}
