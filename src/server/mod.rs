mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::API;
use crate::server::handlers::{geocode, routes, trips};

pub(crate) type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/routes", post(routes::plan))
        .route("/trips/route", post(trips::reconstruct))
        .route("/trips/encode", post(trips::encode))
        .route("/trips/stats", post(trips::stats))
        .route("/geocode", get(geocode::resolve))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(%err, "server stopped");
    }
}
