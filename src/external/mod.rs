pub mod google_maps;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use google_maps::{DirectionsRequest, GeocodeResponse};

/// The geocoding and directions services the planner depends on.
#[async_trait]
pub trait MapsProvider: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, Error>;

    /// Returns the raw response body; driving routes persist it verbatim.
    async fn directions(&self, request: &DirectionsRequest) -> Result<Value, Error>;
}
