use axum::extract::{Extension, Json, Query};
use serde::Deserialize;

use crate::server::DynAPI;
use crate::{
    entities::GeoPoint,
    error::{invalid_input_error, Error},
};

#[derive(Deserialize)]
pub struct GeocodeParams {
    address: String,
}

pub async fn resolve(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeoPoint>, Error> {
    if params.address.trim().is_empty() {
        return Err(invalid_input_error());
    }

    Ok(api.resolve(params.address).await.into())
}
