use axum::extract::{Extension, Json};

use crate::engine::codec;
use crate::entities::{RouteInfo, SaveRouteCommand, TripRecord, TripStats};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn reconstruct(
    Extension(api): Extension<DynAPI>,
    Json(trip): Json<TripRecord>,
) -> Json<RouteInfo> {
    api.reconstruct_route(trip).await.into()
}

pub async fn encode(Json(command): Json<SaveRouteCommand>) -> Result<Json<TripRecord>, Error> {
    let record = codec::encode_trip(command)?;

    Ok(record.into())
}

pub async fn stats(Json(trips): Json<Vec<TripRecord>>) -> Json<TripStats> {
    TripStats::from_trips(&trips).into()
}
