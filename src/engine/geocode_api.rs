use super::Engine;

use async_trait::async_trait;

use crate::{api::GeocodeAPI, entities::GeoPoint};

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, address: String) -> GeoPoint {
        let result = match self.provider.geocode(&address).await {
            Ok(response) => response.first_point(&address),
            Err(err) => Err(err),
        };

        match result {
            Ok(point) => point,
            Err(err) => {
                tracing::warn!(%err, "geocoding failed, substituting sentinel point");
                GeoPoint::sentinel(&address)
            }
        }
    }
}
