use std::sync::Arc;

use backend_domain::{
    core_achievements, AchievementRepository, Clock, GameEvent, UnlockRepository,
};
use tracing::info;

use crate::evaluators::{core_evaluators, register_evaluator, Evaluator};
use crate::ops::{EmitReport, EventBus, FailurePolicy, Subscription};
use crate::{AchievementError, AchievementsService, Metrics};

/// The achievement engine for one process: service, bus and the evaluators
/// wired between them. Built once at startup and handed to every producer
/// and consumer; clones share the same engine.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AchievementsService>,
    pub bus: Arc<EventBus>,
    pub metrics: Arc<Metrics>,
    evaluators: Arc<Vec<Arc<dyn Evaluator>>>,
    subscriptions: Arc<Vec<Subscription>>,
}

impl AppState {
    pub fn bootstrap(
        achievements: Arc<dyn AchievementRepository>,
        unlocks: Arc<dyn UnlockRepository>,
        clock: Arc<dyn Clock>,
        policy: FailurePolicy,
    ) -> Result<Self, AchievementError> {
        let metrics = Arc::new(Metrics::default());
        let service = Arc::new(AchievementsService::new(
            achievements,
            unlocks,
            clock,
            metrics.clone(),
        ));
        let seeded = seed_core_catalog(&service)?;
        let bus = Arc::new(EventBus::new(policy, metrics.clone()));
        let evaluators = core_evaluators();
        let subscriptions = evaluators
            .iter()
            .map(|evaluator| register_evaluator(&bus, service.clone(), evaluator.clone()))
            .collect::<Vec<_>>();
        info!(
            "achievement engine ready: seeded={}, evaluators={}, policy={}",
            seeded,
            subscriptions.len(),
            bus.policy().as_str()
        );
        Ok(Self {
            service,
            bus,
            metrics,
            evaluators: Arc::new(evaluators),
            subscriptions: Arc::new(subscriptions),
        })
    }

    pub fn emit(&self, event: &GameEvent) -> anyhow::Result<EmitReport> {
        self.bus.emit(event)
    }

    /// Clears every evaluator's running streak for `user_id`. Unlocks stay.
    pub fn forget_user(&self, user_id: &str) {
        for evaluator in self.evaluators.iter() {
            evaluator.forget_user(user_id);
        }
    }

    /// Unsubscribes the core evaluators; later emits no longer unlock anything.
    pub fn detach_evaluators(&self) {
        for subscription in self.subscriptions.iter() {
            subscription.unsubscribe();
        }
    }
}

/// Registers every core achievement not already known. Returns how many were added.
pub fn seed_core_catalog(service: &AchievementsService) -> Result<usize, AchievementError> {
    let mut added = 0;
    for achievement in core_achievements() {
        if service.get_achievement(&achievement.id).is_some() {
            continue;
        }
        service.register_achievement(achievement)?;
        added += 1;
    }
    Ok(added)
}
