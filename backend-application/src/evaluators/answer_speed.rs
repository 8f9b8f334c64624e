use backend_domain::{
    AchievementUnlock, EventType, GameEvent, CORE_LIGHTNING_ROUND, CORE_UNDER_1S_CORRECT,
};

use super::{unlock_for_event, Evaluator, StreakCounter};
use crate::{AchievementError, AchievementsService};

pub const UNDER_ONE_SECOND_MS: f64 = 1_000.0;
pub const LIGHTNING_MAX_ANSWER_MS: f64 = 1_500.0;
pub const LIGHTNING_STREAK: u32 = 3;

/// Correct answer strictly faster than one second.
#[derive(Debug, Default)]
pub struct UnderOneSecondEvaluator;

impl Evaluator for UnderOneSecondEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_UNDER_1S_CORRECT
    }

    fn event_type(&self) -> EventType {
        EventType::QuestionAnswered
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let GameEvent::QuestionAnswered(answer) = event else {
            return Ok(None);
        };
        let fast = answer
            .valid_answer_time_ms()
            .map(|ms| ms < UNDER_ONE_SECOND_MS)
            .unwrap_or(false);
        if !(answer.correct && fast) {
            return Ok(None);
        }
        unlock_for_event(service, self.achievement_id(), &answer.user_id, &answer.game_id)
    }
}

/// Three correct answers in a row, each within 1.5 seconds.
#[derive(Debug)]
pub struct LightningRoundEvaluator {
    streak: StreakCounter,
}

impl Default for LightningRoundEvaluator {
    fn default() -> Self {
        Self {
            streak: StreakCounter::new("lightning_round", LIGHTNING_STREAK),
        }
    }
}

impl LightningRoundEvaluator {
    pub fn streak(&self) -> &StreakCounter {
        &self.streak
    }
}

impl Evaluator for LightningRoundEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_LIGHTNING_ROUND
    }

    fn event_type(&self) -> EventType {
        EventType::QuestionAnswered
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let GameEvent::QuestionAnswered(answer) = event else {
            return Ok(None);
        };
        let qualifies = answer.correct
            && answer
                .valid_answer_time_ms()
                .map(|ms| ms <= LIGHTNING_MAX_ANSWER_MS)
                .unwrap_or(false);
        if !qualifies {
            self.streak.reset(&answer.user_id);
            return Ok(None);
        }
        if !self.streak.advance(&answer.user_id) {
            return Ok(None);
        }
        unlock_for_event(service, self.achievement_id(), &answer.user_id, &answer.game_id)
    }

    fn forget_user(&self, user_id: &str) {
        self.streak.forget(user_id);
    }
}
