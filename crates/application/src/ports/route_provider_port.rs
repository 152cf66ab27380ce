//! Route provider port
//!
//! Defines the interface for computing a route between the user and a
//! destination. Adapters in the infrastructure layer implement this port on
//! top of the driving and transit directions services.

use async_trait::async_trait;
use domain::{RouteQuery, RouteResult, TravelMode};
#[cfg(test)]
use mockall::automock;

/// Port for route computation
///
/// Implementations never panic or leak transport errors: every failure is
/// folded into the returned [`RouteResult`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RouteProviderPort: Send + Sync {
    /// Compute a route for the query
    async fn fetch_route(&self, query: &RouteQuery) -> RouteResult;

    /// The travel mode this provider serves
    fn mode(&self) -> TravelMode;
}
