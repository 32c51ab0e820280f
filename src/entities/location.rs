use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    Resolved,
    /// The provider could not resolve the address; coordinates are `(0, 0)`.
    Sentinel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
    #[serde(default)]
    pub confidence: Confidence,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64, formatted_address: String) -> Self {
        Self {
            lat,
            lng,
            formatted_address,
            confidence: Confidence::Resolved,
        }
    }

    pub fn sentinel(address: &str) -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            formatted_address: address.into(),
            confidence: Confidence::Sentinel,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.confidence == Confidence::Sentinel
    }
}

impl From<&GeoPoint> for geo_types::Coord<f64> {
    fn from(point: &GeoPoint) -> Self {
        geo_types::coord! { x: point.lng, y: point.lat }
    }
}
