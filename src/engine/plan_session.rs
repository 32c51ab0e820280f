use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::entities::RouteResult;

#[derive(Clone, Debug, PartialEq)]
pub enum PlanOutcome {
    Applied(RouteResult),
    /// A newer plan was started before this one resolved.
    Stale { generation: u64 },
}

/// Per-viewer planning state. Every recalculation takes a new generation
/// and only the newest generation may replace the current route.
#[derive(Debug, Default)]
pub struct PlanSession {
    latest: AtomicU64,
    current: Mutex<Option<(u64, RouteResult)>>,
}

impl PlanSession {
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }

    pub async fn apply(&self, generation: u64, route: RouteResult) -> PlanOutcome {
        let mut current = self.current.lock().await;

        if !self.is_current(generation) {
            tracing::info!(generation, "discarding result of superseded plan");
            return PlanOutcome::Stale { generation };
        }

        *current = Some((generation, route.clone()));
        PlanOutcome::Applied(route)
    }

    pub async fn current(&self) -> Option<RouteResult> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|(_, route)| route.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{directions_body, FakeProvider};
    use crate::engine::Engine;
    use crate::{api::RouteAPI, config::PlannerConfig};
    use tokio_test::block_on;

    fn planned(engine: &Engine) -> RouteResult {
        block_on(engine.plan_route("A".into(), "B".into(), vec![])).unwrap()
    }

    #[test]
    fn older_result_cannot_overwrite_newer_one() {
        let provider =
            FakeProvider::default().with_directions(directions_body(&[(1000, 60)], vec![]));
        let engine = Engine::new(provider, PlannerConfig::default());
        let session = PlanSession::default();

        let first = session.begin();
        let second = session.begin();
        let older = planned(&engine);
        let newer = planned(&engine);

        assert_eq!(
            block_on(session.apply(second, newer.clone())),
            PlanOutcome::Applied(newer.clone())
        );
        assert_eq!(
            block_on(session.apply(first, older)),
            PlanOutcome::Stale { generation: first }
        );
        assert_eq!(block_on(session.current()), Some(newer));
    }

    #[test]
    fn latest_plan_is_applied() {
        let provider =
            FakeProvider::default().with_directions(directions_body(&[(1000, 60)], vec![]));
        let engine = Engine::new(provider, PlannerConfig::default());
        let session = PlanSession::default();

        let outcome =
            block_on(engine.plan_route_for(&session, "A".into(), "B".into(), vec![])).unwrap();

        match outcome {
            PlanOutcome::Applied(route) => {
                assert_eq!(block_on(session.current()).unwrap().token, route.token)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
