use serde_json::Value;

use crate::{
    entities::{non_blank, PersistedRoute, RouteResult, SaveRouteCommand, TripRecord},
    error::{route_payload_parse_error, Error},
};

/// Keeps only the provider payload and the aggregate totals. Flight
/// coordinates are cheap to re-derive and never stored.
pub fn encode(route: &RouteResult) -> Result<PersistedRoute, Error> {
    Ok(PersistedRoute {
        raw_payload: serde_json::to_string(&route.raw_payload)?,
        total_distance_km: route.total_distance_km,
        total_duration_min: route.total_duration_min,
    })
}

pub fn decode(raw_payload: &str) -> Result<Value, Error> {
    serde_json::from_str(raw_payload).map_err(|err| {
        tracing::warn!(%err, "stored route payload is malformed");
        route_payload_parse_error()
    })
}

#[tracing::instrument(skip(command), fields(token = %command.route.token))]
pub fn encode_trip(command: SaveRouteCommand) -> Result<TripRecord, Error> {
    let persisted = encode(&command.route)?;

    Ok(TripRecord {
        start_location: command.start_location.trim().into(),
        end_location: command.end_location.trim().into(),
        waypoints: non_blank(&command.waypoints).collect(),
        route_data: Some(persisted.raw_payload),
        total_distance: persisted.total_distance_km as f64,
        total_duration: persisted.total_duration_min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bounds, GeoPoint, RouteLeg};
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn route() -> RouteResult {
        let start = GeoPoint::new(3.1, 101.7, "Kuala Lumpur".into());
        let end = GeoPoint::new(5.4, 100.3, "Penang".into());

        RouteResult {
            token: Uuid::new_v4(),
            computed_at: Utc::now(),
            legs: vec![RouteLeg {
                start,
                end,
                distance_meters: 350_000,
                duration_seconds: 14_400,
            }],
            total_distance_km: 350,
            total_duration_min: 240,
            optimized_waypoint_order: vec![],
            optimized_waypoints: vec![],
            bounds: Bounds {
                north: 5.4,
                south: 3.1,
                east: 101.7,
                west: 100.3,
            },
            raw_payload: json!({"status": "OK", "routes": [{"legs": []}]}),
        }
    }

    #[test]
    fn encode_keeps_payload_and_totals_only() {
        let persisted = encode(&route()).unwrap();

        assert_eq!(persisted.total_distance_km, 350);
        assert_eq!(persisted.total_duration_min, 240);
        assert_eq!(
            decode(&persisted.raw_payload).unwrap(),
            json!({"status": "OK", "routes": [{"legs": []}]})
        );
    }

    #[test]
    fn truncated_payload_fails_to_decode() {
        assert_eq!(decode("{").unwrap_err().code, 102);
        assert_eq!(decode("").unwrap_err().code, 102);
    }

    #[test]
    fn save_command_drops_blank_waypoints() {
        let record = encode_trip(SaveRouteCommand {
            start_location: " Kuala Lumpur, Malaysia ".into(),
            end_location: "Penang, Malaysia".into(),
            waypoints: vec!["Ipoh, Malaysia".into(), "   ".into()],
            route: route(),
        })
        .unwrap();

        assert_eq!(record.start_location, "Kuala Lumpur, Malaysia");
        assert_eq!(record.waypoints, vec!["Ipoh, Malaysia"]);
        assert_eq!(record.total_distance, 350.0);
        assert_eq!(record.total_duration, 240);
        assert!(record.route_data.is_some());
    }
}
