pub mod bounds;
pub mod classifier;
pub mod codec;
mod geocode_api;
mod plan_session;
mod reconstruct_api;
mod route_api;

pub use plan_session::{PlanOutcome, PlanSession};
pub use route_api::{total_distance_km, total_duration_min, MAX_WAYPOINTS};

use crate::{api::API, config::PlannerConfig, external::MapsProvider};

pub struct Engine {
    provider: Box<dyn MapsProvider>,
    config: PlannerConfig,
}

impl Engine {
    pub fn new<P: MapsProvider + 'static>(provider: P, config: PlannerConfig) -> Self {
        Self {
            provider: Box::new(provider),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl API for Engine {}
