// Achievement evaluators
// One evaluator per rule; each listens to a single event type and asks the
// service to unlock when its condition holds. Already-unlocked bookkeeping
// belongs to the service, streak bookkeeping to the evaluator.

pub mod answer_speed;
pub mod game_lifecycle;
pub mod game_result;
pub mod streak;

use std::sync::Arc;

use backend_domain::{AchievementUnlock, EventType, GameEvent, UnlockContext};

use crate::ops::{EventBus, Subscription};
use crate::{AchievementError, AchievementsService};

pub use answer_speed::*;
pub use game_lifecycle::*;
pub use game_result::*;
pub use streak::StreakCounter;

pub trait Evaluator: Send + Sync {
    fn achievement_id(&self) -> &'static str;

    fn event_type(&self) -> EventType;

    /// Inspects one event. Events of other types are ignored.
    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError>;

    /// Drops any per-user running state.
    fn forget_user(&self, _user_id: &str) {}
}

pub fn core_evaluators() -> Vec<Arc<dyn Evaluator>> {
    vec![
        Arc::new(UnderOneSecondEvaluator),
        Arc::new(LightningRoundEvaluator::default()),
        Arc::new(FirstGameCreatedEvaluator),
        Arc::new(FirstGameJoinedEvaluator),
        Arc::new(FivePerfectGamesEvaluator::default()),
        Arc::new(PartyStarterEvaluator),
        Arc::new(ComebackKidEvaluator),
        Arc::new(ScholarModeEvaluator),
    ]
}

pub fn register_evaluator(
    bus: &EventBus,
    service: Arc<AchievementsService>,
    evaluator: Arc<dyn Evaluator>,
) -> Subscription {
    bus.on(evaluator.event_type(), move |event| {
        evaluator.evaluate(event, &service)?;
        Ok(())
    })
}

pub(crate) fn unlock_for_event(
    service: &AchievementsService,
    achievement_id: &str,
    user_id: &str,
    game_id: &str,
) -> Result<Option<AchievementUnlock>, AchievementError> {
    service
        .unlock_achievement(user_id, achievement_id, Some(UnlockContext::for_game(game_id)))
        .map(Some)
}
