use serde::{Deserialize, Serialize};

use crate::entities::RouteResult;

/// The durable subset of a planned route, written at save time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedRoute {
    pub raw_payload: String,
    pub total_distance_km: u64,
    pub total_duration_min: u64,
}

/// A saved trip as the persistence layer exposes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub start_location: String,
    pub end_location: String,
    #[serde(default)]
    pub waypoints: Vec<String>,
    #[serde(default)]
    pub route_data: Option<String>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_duration: u64,
}

impl TripRecord {
    /// `[start, ...waypoints, end]`, skipping blank waypoints.
    pub fn stops(&self) -> Vec<String> {
        let mut stops = Vec::with_capacity(self.waypoints.len() + 2);

        stops.push(self.start_location.clone());
        stops.extend(non_blank(&self.waypoints));
        stops.push(self.end_location.clone());

        stops
    }
}

/// An explicit save request carrying the route the user just planned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveRouteCommand {
    pub start_location: String,
    pub end_location: String,
    #[serde(default)]
    pub waypoints: Vec<String>,
    pub route: RouteResult,
}

/// List view of a trip without the heavy route payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub start_location: String,
    pub end_location: String,
    pub waypoints: Vec<String>,
    pub total_distance: f64,
    pub total_duration: u64,
}

impl From<&TripRecord> for TripSummary {
    fn from(trip: &TripRecord) -> Self {
        Self {
            start_location: trip.start_location.clone(),
            end_location: trip.end_location.clone(),
            waypoints: trip.waypoints.clone(),
            total_distance: trip.total_distance,
            total_duration: trip.total_duration,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TripStats {
    pub total_trips: usize,
    pub total_distance: f64,
    pub total_duration: u64,
}

impl TripStats {
    pub fn from_trips(trips: &[TripRecord]) -> Self {
        trips.iter().fold(Self::default(), |mut stats, trip| {
            stats.total_trips += 1;
            stats.total_distance += trip.total_distance;
            stats.total_duration += trip.total_duration;
            stats
        })
    }
}

pub(crate) fn non_blank(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}
