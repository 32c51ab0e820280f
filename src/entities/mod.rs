mod location;
mod route;
mod route_info;
mod trip;

pub use location::{Confidence, GeoPoint};
pub use route::{Bounds, RouteLeg, RouteResult};
pub use route_info::{RouteInfo, RouteMode};
pub use trip::{PersistedRoute, SaveRouteCommand, TripRecord, TripStats, TripSummary};

pub(crate) use trip::non_blank;
