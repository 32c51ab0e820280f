use geo_types::Line;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{Bounds, GeoPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    Driving,
    Flight,
}

impl RouteMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Flight => "flight",
        }
    }
}

/// Render-ready route rebuilt on every page load; never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub mode: RouteMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<GeoPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Stored provider payload, handed to the renderer as-is for driving routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Value>,
    pub total_distance_km: f64,
    pub total_duration_min: u64,
}

impl RouteInfo {
    pub fn minimal(mode: RouteMode, total_distance_km: f64, total_duration_min: u64) -> Self {
        Self {
            mode,
            coordinates: None,
            bounds: None,
            route: None,
            total_distance_km,
            total_duration_min,
        }
    }

    /// Straight-line hops between consecutive stops, in stop order.
    pub fn flight_segments(&self) -> Vec<Line<f64>> {
        match (&self.mode, &self.coordinates) {
            (RouteMode::Flight, Some(points)) => points
                .windows(2)
                .map(|pair| Line::new(&pair[0], &pair[1]))
                .collect(),
            _ => vec![],
        }
    }
}
