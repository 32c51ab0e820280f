use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::Config,
    entities::{Bounds, GeoPoint, RouteLeg},
    error::{geocode_error, invalid_input_error, upstream_error, Error},
    external::MapsProvider,
};

/// Coordinates as the provider sends them. Some endpoints spell the axes
/// out in full, so both spellings are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lng: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    /// Normalizes the first match into a `GeoPoint`, falling back to the
    /// queried text when the provider omits a formatted address.
    pub fn first_point(self, address: &str) -> Result<GeoPoint, Error> {
        if self.status != "OK" {
            return Err(geocode_error(&self.status));
        }

        let result = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| geocode_error("ZERO_RESULTS"))?;

        let LatLng { lat, lng } = result.geometry.location;
        let formatted_address = result
            .formatted_address
            .unwrap_or_else(|| address.to_string());

        Ok(GeoPoint::new(lat, lng, formatted_address))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
    pub optimize_waypoints: bool,
}

impl DirectionsRequest {
    pub fn driving(origin: String, destination: String, waypoints: Vec<String>) -> Self {
        let optimize_waypoints = !waypoints.is_empty();

        Self {
            origin,
            destination,
            waypoints,
            optimize_waypoints,
        }
    }

    fn waypoints_param(&self) -> Option<String> {
        if self.waypoints.is_empty() {
            return None;
        }

        let mut parts = Vec::with_capacity(self.waypoints.len() + 1);
        if self.optimize_waypoints {
            parts.push("optimize:true".to_string());
        }
        parts.extend(self.waypoints.iter().cloned());

        Some(parts.join("|"))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsLeg {
    #[serde(default)]
    pub distance: TextValue,
    #[serde(default)]
    pub duration: TextValue,
    #[serde(default)]
    pub start_address: Option<String>,
    #[serde(default)]
    pub end_address: Option<String>,
    pub start_location: LatLng,
    pub end_location: LatLng,
}

impl DirectionsLeg {
    pub fn normalize(&self) -> RouteLeg {
        let point = |location: &LatLng, address: &Option<String>| {
            GeoPoint::new(
                location.lat,
                location.lng,
                address.clone().unwrap_or_default(),
            )
        };

        RouteLeg {
            start: point(&self.start_location, &self.start_address),
            end: point(&self.end_location, &self.end_address),
            distance_meters: self.distance.value,
            duration_seconds: self.duration.value,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

impl From<LatLngBounds> for Bounds {
    fn from(bounds: LatLngBounds) -> Self {
        Bounds {
            north: bounds.northeast.lat.max(bounds.southwest.lat),
            south: bounds.northeast.lat.min(bounds.southwest.lat),
            east: bounds.northeast.lng.max(bounds.southwest.lng),
            west: bounds.northeast.lng.min(bounds.southwest.lng),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
    #[serde(default)]
    pub bounds: Option<LatLngBounds>,
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.google_maps_api_base.clone(),
            api_key: config.google_maps_api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("https://{}/maps/api/{}/json", self.api_base, path)
    }
}

fn check_http_status(res: &reqwest::Response) -> Result<(), Error> {
    let status_code = res.status().as_u16();

    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(())
}

#[async_trait]
impl MapsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, Error> {
        let res = self
            .client
            .get(self.url("geocode"))
            .query(&[("key", self.api_key.as_str())])
            .query(&[("address", address)])
            .send()
            .await?;

        check_http_status(&res)?;

        Ok(res.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: &DirectionsRequest) -> Result<Value, Error> {
        let mut builder = self
            .client
            .get(self.url("directions"))
            .query(&[("key", self.api_key.as_str())])
            .query(&[("origin", request.origin.as_str())])
            .query(&[("destination", request.destination.as_str())])
            .query(&[("mode", "driving")]);

        if let Some(waypoints) = request.waypoints_param() {
            builder = builder.query(&[("waypoints", waypoints)]);
        }

        let res = builder.send().await?;

        check_http_status(&res)?;

        Ok(res.json().await?)
    }
}
