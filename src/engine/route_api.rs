use super::{bounds::bounds_of, Engine, PlanOutcome, PlanSession};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::RouteAPI,
    entities::{non_blank, GeoPoint, RouteLeg, RouteResult},
    error::{directions_error, invalid_input_error, upstream_error, DirectionsFailure, Error},
    external::google_maps::{DirectionsRequest, DirectionsResponse},
};

/// Intermediate stops the directions provider accepts in one request.
pub const MAX_WAYPOINTS: usize = 23;

pub fn total_distance_km(legs: &[RouteLeg]) -> u64 {
    let meters: u64 = legs.iter().map(|leg| leg.distance_meters).sum();
    (meters as f64 / 1000.0).round() as u64
}

pub fn total_duration_min(legs: &[RouteLeg]) -> u64 {
    let seconds: u64 = legs.iter().map(|leg| leg.duration_seconds).sum();
    (seconds as f64 / 60.0).round() as u64
}

/// The provider's order when it is a permutation of `0..n`, identity otherwise.
fn waypoint_order(provided: &[usize], n: usize) -> Vec<usize> {
    let mut seen = vec![false; n];
    let is_permutation = provided.len() == n
        && provided
            .iter()
            .all(|&i| i < n && !std::mem::replace(&mut seen[i], true));

    if is_permutation {
        return provided.to_vec();
    }

    if !provided.is_empty() {
        tracing::warn!(?provided, n, "ignoring malformed waypoint order");
    }

    (0..n).collect()
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_route(
        &self,
        origin: String,
        destination: String,
        waypoints: Vec<String>,
    ) -> Result<RouteResult, Error> {
        let origin = origin.trim().to_string();
        let destination = destination.trim().to_string();
        let waypoints: Vec<String> = non_blank(&waypoints).collect();

        if origin.is_empty() || destination.is_empty() {
            return Err(invalid_input_error());
        }

        if waypoints.len() > MAX_WAYPOINTS {
            return Err(directions_error(DirectionsFailure::WaypointLimitExceeded));
        }

        let request = DirectionsRequest::driving(origin, destination, waypoints.clone());
        let raw_payload = self.provider.directions(&request).await?;

        let response: DirectionsResponse =
            serde_json::from_value(raw_payload.clone()).map_err(|_| upstream_error())?;

        if let Some(failure) = DirectionsFailure::from_status(&response.status) {
            tracing::warn!(status = %response.status, "directions request failed");
            return Err(directions_error(failure));
        }

        // the provider ranks candidates; the first one is the default choice
        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| directions_error(DirectionsFailure::ZeroResults))?;

        let legs: Vec<RouteLeg> = route.legs.iter().map(|leg| leg.normalize()).collect();
        if legs.is_empty() {
            return Err(directions_error(DirectionsFailure::ZeroResults));
        }

        let order = waypoint_order(&route.waypoint_order, waypoints.len());
        let optimized_waypoints = order.iter().map(|&i| waypoints[i].clone()).collect();

        let bounds = match route.bounds {
            Some(bounds) => bounds.into(),
            None => {
                let endpoints: Vec<GeoPoint> = legs
                    .iter()
                    .flat_map(|leg| [leg.start.clone(), leg.end.clone()])
                    .collect();
                bounds_of(&endpoints)?
            }
        };

        let result = RouteResult {
            token: Uuid::new_v4(),
            computed_at: Utc::now(),
            total_distance_km: total_distance_km(&legs),
            total_duration_min: total_duration_min(&legs),
            legs,
            optimized_waypoint_order: order,
            optimized_waypoints,
            bounds,
            raw_payload,
        };

        tracing::info!(
            token = %result.token,
            km = result.total_distance_km,
            min = result.total_duration_min,
            "route planned"
        );

        Ok(result)
    }
}

impl Engine {
    /// Plans a route on behalf of `session`, applying the result only if no
    /// newer plan was started on that session in the meantime.
    #[tracing::instrument(skip(self, session))]
    pub async fn plan_route_for(
        &self,
        session: &PlanSession,
        origin: String,
        destination: String,
        waypoints: Vec<String>,
    ) -> Result<PlanOutcome, Error> {
        let generation = session.begin();

        match self.plan_route(origin, destination, waypoints).await {
            Ok(route) => Ok(session.apply(generation, route).await),
            Err(_) if !session.is_current(generation) => {
                tracing::info!(generation, "discarding failure of superseded plan");
                Ok(PlanOutcome::Stale { generation })
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::engine::testing::{directions_body, FakeProvider};
    use crate::entities::RouteMode;
    use serde_json::json;
    use tokio_test::block_on;

    fn engine(directions: serde_json::Value) -> (Engine, FakeProvider) {
        let provider = FakeProvider::default().with_directions(directions);
        (
            Engine::new(provider.clone(), PlannerConfig::default()),
            provider,
        )
    }

    fn leg(distance_meters: u64, duration_seconds: u64) -> RouteLeg {
        RouteLeg {
            start: GeoPoint::new(0.0, 0.0, "".into()),
            end: GeoPoint::new(0.0, 0.0, "".into()),
            distance_meters,
            duration_seconds,
        }
    }

    #[test]
    fn totals_round_to_nearest_unit() {
        assert_eq!(total_distance_km(&[]), 0);
        assert_eq!(total_distance_km(&[leg(1499, 0)]), 1);
        assert_eq!(total_distance_km(&[leg(1000, 0), leg(500, 0)]), 2);
        assert_eq!(total_distance_km(&[leg(120_400, 0), leg(229_700, 0)]), 350);

        assert_eq!(total_duration_min(&[leg(0, 89)]), 1);
        assert_eq!(total_duration_min(&[leg(0, 60), leg(0, 30)]), 2);
        assert_eq!(total_duration_min(&[leg(0, 7200), leg(0, 7199)]), 240);
    }

    #[test]
    fn kuala_lumpur_to_penang_via_ipoh() {
        let (engine, provider) = engine(directions_body(
            &[(205_000, 7_500), (145_000, 6_300)],
            vec![0],
        ));

        let route = block_on(engine.plan_route(
            "Kuala Lumpur, Malaysia".into(),
            "Penang, Malaysia".into(),
            vec!["Ipoh, Malaysia".into()],
        ))
        .unwrap();

        assert_eq!(route.total_distance_km, 350);
        assert_eq!(route.total_duration_min, 230);
        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.optimized_waypoint_order, vec![0]);
        assert_eq!(route.optimized_waypoints, vec!["Ipoh, Malaysia"]);
        assert_eq!(
            engine.config().classify(route.total_distance_km as f64),
            RouteMode::Driving
        );

        let calls = provider.directions_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].optimize_waypoints);
    }

    #[test]
    fn waypoints_follow_provider_order() {
        let (engine, _) = engine(directions_body(
            &[(1000, 60), (1000, 60), (1000, 60), (1000, 60)],
            vec![2, 0, 1],
        ));

        let route = block_on(engine.plan_route(
            "A".into(),
            "E".into(),
            vec!["B".into(), "C".into(), "D".into()],
        ))
        .unwrap();

        assert_eq!(route.optimized_waypoint_order, vec![2, 0, 1]);
        assert_eq!(route.optimized_waypoints, vec!["D", "B", "C"]);
    }

    #[test]
    fn malformed_order_falls_back_to_identity() {
        assert_eq!(waypoint_order(&[], 3), vec![0, 1, 2]);
        assert_eq!(waypoint_order(&[0, 0, 1], 3), vec![0, 1, 2]);
        assert_eq!(waypoint_order(&[0, 3, 1], 3), vec![0, 1, 2]);
        assert_eq!(waypoint_order(&[1, 0], 2), vec![1, 0]);
    }

    #[test]
    fn no_waypoints_means_no_optimization() {
        let (engine, provider) = engine(directions_body(&[(5_312_000, 30_000)], vec![]));

        let route = block_on(engine.plan_route(
            "Malaysia".into(),
            "Japan".into(),
            vec!["  ".into()],
        ))
        .unwrap();

        assert!(route.optimized_waypoint_order.is_empty());
        assert_eq!(
            engine.config().classify(route.total_distance_km as f64),
            RouteMode::Flight
        );

        let calls = provider.directions_calls.lock().unwrap();
        assert!(calls[0].waypoints.is_empty());
        assert!(!calls[0].optimize_waypoints);
    }

    #[test]
    fn zero_results_is_surfaced() {
        let (engine, _) = engine(json!({"status": "ZERO_RESULTS", "routes": []}));

        let err = block_on(engine.plan_route("Malaysia".into(), "Hawaii".into(), vec![]))
            .unwrap_err();

        assert_eq!(err.code, DirectionsFailure::ZeroResults.code());
        assert_eq!(err.message, "No route could be found between these locations.");
    }

    #[test]
    fn too_many_waypoints_never_reach_the_provider() {
        let (engine, provider) = engine(directions_body(&[(1000, 60)], vec![]));
        let waypoints = (0..24).map(|i| format!("Stop {}", i)).collect();

        let err = block_on(engine.plan_route("A".into(), "B".into(), waypoints)).unwrap_err();

        assert_eq!(err.code, DirectionsFailure::WaypointLimitExceeded.code());
        assert!(provider.directions_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_origin_is_invalid_input() {
        let (engine, _) = engine(directions_body(&[(1000, 60)], vec![]));

        let err = block_on(engine.plan_route(" ".into(), "B".into(), vec![])).unwrap_err();

        assert_eq!(err.code, 101);
    }

    #[test]
    fn missing_route_bounds_are_computed_from_legs() {
        let mut body = directions_body(&[(1000, 60), (2000, 120)], vec![]);
        body["routes"][0].as_object_mut().unwrap().remove("bounds");
        let (engine, _) = engine(body);

        let route = block_on(engine.plan_route("A".into(), "B".into(), vec![])).unwrap();

        for leg in &route.legs {
            assert!(route.bounds.contains(&leg.start));
            assert!(route.bounds.contains(&leg.end));
        }
    }

    #[test]
    fn first_candidate_route_is_chosen() {
        let mut body = directions_body(&[(60_000, 3_000), (40_000, 2_400)], vec![]);
        let alternative = directions_body(&[(900_000, 36_000)], vec![])["routes"][0].clone();
        body["routes"].as_array_mut().unwrap().push(alternative);
        let (engine, _) = engine(body);

        let route = block_on(engine.plan_route("A".into(), "B".into(), vec![])).unwrap();

        assert_eq!(route.total_distance_km, 100);
        assert_eq!(route.total_duration_min, 90);
        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.legs[0].distance_meters, 60_000);
        assert_eq!(route.legs[1].distance_meters, 40_000);
    }

    #[test]
    fn failed_plan_leaves_session_untouched() {
        let (engine, _) = engine(json!({"status": "OVER_QUERY_LIMIT"}));
        let session = PlanSession::default();

        let err = block_on(engine.plan_route_for(&session, "A".into(), "B".into(), vec![]))
            .unwrap_err();
        assert_eq!(err.code, DirectionsFailure::QuotaExceeded.code());
        assert!(block_on(session.current()).is_none());
    }
}
