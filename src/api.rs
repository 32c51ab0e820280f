use async_trait::async_trait;

use crate::entities::{GeoPoint, RouteInfo, RouteResult, TripRecord};
use crate::error::Error;

#[async_trait]
pub trait GeocodeAPI {
    /// Never fails: unresolvable addresses come back as a sentinel point.
    async fn resolve(&self, address: String) -> GeoPoint;
}

#[async_trait]
pub trait RouteAPI {
    async fn plan_route(
        &self,
        origin: String,
        destination: String,
        waypoints: Vec<String>,
    ) -> Result<RouteResult, Error>;
}

#[async_trait]
pub trait ReconstructAPI {
    async fn reconstruct_route(&self, trip: TripRecord) -> RouteInfo;
}

pub trait API: GeocodeAPI + RouteAPI + ReconstructAPI {}
