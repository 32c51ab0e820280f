use std::env;
use std::net::SocketAddr;

use crate::entities::RouteMode;
use crate::error::Error;

pub const DEFAULT_FLIGHT_THRESHOLD_KM: f64 = 3000.0;

#[derive(Clone, Debug)]
pub struct Config {
    pub google_maps_api_base: String,
    pub google_maps_api_key: String,
    pub bind_addr: SocketAddr,
    pub planner: PlannerConfig,
}

/// Policy knobs the engine consults while planning and reconstructing.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Trips longer than this many kilometres are drawn as flights.
    pub flight_threshold_km: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            flight_threshold_km: DEFAULT_FLIGHT_THRESHOLD_KM,
        }
    }
}

impl PlannerConfig {
    pub fn classify(&self, total_distance_km: f64) -> RouteMode {
        crate::engine::classifier::classify(total_distance_km, self.flight_threshold_km)
    }
}

/// Parses a threshold override. Anything that is not a finite, non-negative
/// number falls back to the default.
fn flight_threshold_km(raw: Option<&str>) -> f64 {
    let raw = match raw {
        Some(raw) => raw,
        None => return DEFAULT_FLIGHT_THRESHOLD_KM,
    };

    match raw.trim().parse::<f64>() {
        Ok(km) if km.is_finite() && km >= 0.0 => km,
        _ => {
            tracing::warn!(
                value = raw,
                default = DEFAULT_FLIGHT_THRESHOLD_KM,
                "invalid TRIPMATE_FLIGHT_THRESHOLD_KM, using default"
            );
            DEFAULT_FLIGHT_THRESHOLD_KM
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let flight_threshold_km =
            flight_threshold_km(env::var("TRIPMATE_FLIGHT_THRESHOLD_KM").ok().as_deref());

        Ok(Self {
            google_maps_api_base: env::var("GOOGLE_MAPS_API_BASE")
                .unwrap_or_else(|_| "maps.googleapis.com".into()),
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")?,
            bind_addr: env::var("TRIPMATE_BIND_ADDR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
            planner: PlannerConfig {
                flight_threshold_km,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_override_is_parsed() {
        assert_eq!(flight_threshold_km(None), DEFAULT_FLIGHT_THRESHOLD_KM);
        assert_eq!(flight_threshold_km(Some("1500")), 1500.0);
        assert_eq!(flight_threshold_km(Some(" 0 ")), 0.0);
    }

    #[test]
    fn unusable_threshold_falls_back_to_default() {
        for raw in ["", "far", "NaN", "inf", "-10"] {
            assert_eq!(flight_threshold_km(Some(raw)), DEFAULT_FLIGHT_THRESHOLD_KM);
        }
    }
}
