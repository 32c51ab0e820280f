use super::{bounds::bounds_of, codec, Engine};

use async_trait::async_trait;

use crate::{
    api::{GeocodeAPI, ReconstructAPI},
    entities::{Bounds, GeoPoint, RouteInfo, RouteMode, TripRecord},
    error::{reconstruction_error, Error},
};

#[async_trait]
impl ReconstructAPI for Engine {
    #[tracing::instrument(skip(self, trip), fields(km = trip.total_distance))]
    async fn reconstruct_route(&self, trip: TripRecord) -> RouteInfo {
        let mode = self.config.classify(trip.total_distance);
        let minimal = RouteInfo::minimal(mode, trip.total_distance, trip.total_duration);

        let payload = match trip.route_data.as_deref().map(codec::decode) {
            Some(Ok(payload)) => payload,
            Some(Err(_)) => return minimal,
            None => {
                tracing::info!("trip has no stored route");
                return minimal;
            }
        };

        match mode {
            RouteMode::Driving => RouteInfo {
                route: Some(payload),
                ..minimal
            },
            RouteMode::Flight => match self.rebuild_flight(&trip).await {
                Ok((coordinates, bounds)) => RouteInfo {
                    coordinates: Some(coordinates),
                    bounds: Some(bounds),
                    ..minimal
                },
                Err(err) => {
                    tracing::warn!(%err, "flight route degraded to totals only");
                    minimal
                }
            },
        }
    }
}

impl Engine {
    /// Geocodes the stops one at a time so `coordinates[i]` is always stop `i`.
    async fn rebuild_flight(
        &self,
        trip: &TripRecord,
    ) -> Result<(Vec<GeoPoint>, Bounds), Error> {
        let stops = trip.stops();
        let mut coordinates = Vec::with_capacity(stops.len());

        for stop in stops.iter() {
            coordinates.push(self.resolve(stop.clone()).await);
        }

        let bounds = bounds_of(&coordinates).map_err(|err| {
            tracing::error!(%err, "no stops to bound");
            reconstruction_error()
        })?;

        tracing::info!(stops = stops.len(), "flight route reconstructed");

        Ok((coordinates, bounds))
    }
}
