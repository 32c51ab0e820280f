use crate::entities::RouteMode;

/// Trips strictly longer than `threshold_km` are flights.
pub fn classify(total_distance_km: f64, threshold_km: f64) -> RouteMode {
    if total_distance_km > threshold_km {
        RouteMode::Flight
    } else {
        RouteMode::Driving
    }
}

#[test]
fn threshold_is_exclusive() {
    use crate::config::DEFAULT_FLIGHT_THRESHOLD_KM;

    for km in [0.0, 1.0, 350.0, 2999.0, 3000.0] {
        assert_eq!(classify(km, DEFAULT_FLIGHT_THRESHOLD_KM), RouteMode::Driving);
    }
    for km in [3000.5, 3001.0, 5312.0, 20000.0] {
        assert_eq!(classify(km, DEFAULT_FLIGHT_THRESHOLD_KM), RouteMode::Flight);
    }
}

#[test]
fn threshold_is_configurable() {
    use crate::config::PlannerConfig;

    let config = PlannerConfig {
        flight_threshold_km: 500.0,
    };

    assert_eq!(config.classify(350.0), RouteMode::Driving);
    assert_eq!(config.classify(501.0), RouteMode::Flight);
    assert_eq!(PlannerConfig::default().classify(501.0), RouteMode::Driving);
}
