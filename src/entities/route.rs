use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::GeoPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

/// Minimal lat/lng rectangle. Antimeridian crossing is not modelled, so
/// `north >= south` and `east >= west` always hold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.south <= point.lat
            && point.lat <= self.north
            && self.west <= point.lng
            && point.lng <= self.east
    }
}

impl From<Bounds> for geo_types::Rect<f64> {
    fn from(bounds: Bounds) -> Self {
        geo_types::Rect::new(
            geo_types::coord! { x: bounds.west, y: bounds.south },
            geo_types::coord! { x: bounds.east, y: bounds.north },
        )
    }
}

/// A freshly planned route. Replaced, never mutated, on every re-plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub token: Uuid,
    pub computed_at: DateTime<Utc>,
    pub legs: Vec<RouteLeg>,
    pub total_distance_km: u64,
    pub total_duration_min: u64,
    pub optimized_waypoint_order: Vec<usize>,
    /// The caller's waypoints, reordered by `optimized_waypoint_order`.
    pub optimized_waypoints: Vec<String>,
    pub bounds: Bounds,
    pub raw_payload: Value,
}
