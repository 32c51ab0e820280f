pub mod geocode;
pub mod routes;
pub mod trips;
