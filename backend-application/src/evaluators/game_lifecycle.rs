use backend_domain::{
    AchievementUnlock, EventType, GameEvent, CORE_FIRST_GAME_CREATED, CORE_FIRST_GAME_JOINED,
};

use super::{unlock_for_event, Evaluator};
use crate::{AchievementError, AchievementsService};

#[derive(Debug, Default)]
pub struct FirstGameCreatedEvaluator;

impl Evaluator for FirstGameCreatedEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_FIRST_GAME_CREATED
    }

    fn event_type(&self) -> EventType {
        EventType::GameCreated
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let GameEvent::GameCreated(created) = event else {
            return Ok(None);
        };
        unlock_for_event(service, self.achievement_id(), &created.user_id, &created.game_id)
    }
}

#[derive(Debug, Default)]
pub struct FirstGameJoinedEvaluator;

impl Evaluator for FirstGameJoinedEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_FIRST_GAME_JOINED
    }

    fn event_type(&self) -> EventType {
        EventType::GameJoined
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let GameEvent::GameJoined(joined) = event else {
            return Ok(None);
        };
        unlock_for_event(service, self.achievement_id(), &joined.user_id, &joined.game_id)
    }
}
