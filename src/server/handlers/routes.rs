use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::server::DynAPI;
use crate::{entities::RouteResult, error::Error};

#[derive(Serialize, Deserialize)]
pub struct PlanParams {
    origin: String,
    destination: String,
    #[serde(default)]
    waypoints: Vec<String>,
}

pub async fn plan(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PlanParams>,
) -> Result<Json<RouteResult>, Error> {
    let route = api
        .plan_route(params.origin, params.destination, params.waypoints)
        .await?;

    Ok(route.into())
}
