use backend_domain::{
    AchievementUnlock, EventType, GameEvent, GameFinished, CORE_COMEBACK_KID,
    CORE_FIVE_PERFECT_GAMES, CORE_PARTY_STARTER, CORE_SCHOLAR_MODE_ACTIVATED,
};

use super::{unlock_for_event, Evaluator, StreakCounter};
use crate::{AchievementError, AchievementsService};

pub const PERFECT_SCORE: f64 = 100.0;
pub const PERFECT_GAME_STREAK: u32 = 5;
pub const PARTY_MIN_PLAYERS: usize = 4;
pub const SCHOLAR_MIN_ACCURACY: f64 = 1.0;

fn finished(event: &GameEvent) -> Option<&GameFinished> {
    match event {
        GameEvent::GameFinished(result) => Some(result),
        _ => None,
    }
}

/// Five consecutive finishes at or above the perfect score.
#[derive(Debug)]
pub struct FivePerfectGamesEvaluator {
    streak: StreakCounter,
}

impl Default for FivePerfectGamesEvaluator {
    fn default() -> Self {
        Self {
            streak: StreakCounter::new("five_perfect_games", PERFECT_GAME_STREAK),
        }
    }
}

impl FivePerfectGamesEvaluator {
    pub fn streak(&self) -> &StreakCounter {
        &self.streak
    }
}

impl Evaluator for FivePerfectGamesEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_FIVE_PERFECT_GAMES
    }

    fn event_type(&self) -> EventType {
        EventType::GameFinished
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let Some(result) = finished(event) else {
            return Ok(None);
        };
        let perfect = result.final_score >= PERFECT_SCORE;
        if !perfect {
            self.streak.reset(&result.user_id);
            return Ok(None);
        }
        if !self.streak.advance(&result.user_id) {
            return Ok(None);
        }
        unlock_for_event(service, self.achievement_id(), &result.user_id, &result.game_id)
    }

    fn forget_user(&self, user_id: &str) {
        self.streak.forget(user_id);
    }
}

/// The host finishes a game with a full table.
#[derive(Debug, Default)]
pub struct PartyStarterEvaluator;

impl Evaluator for PartyStarterEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_PARTY_STARTER
    }

    fn event_type(&self) -> EventType {
        EventType::GameFinished
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let Some(result) = finished(event) else {
            return Ok(None);
        };
        let is_host = result.host_user_id.as_deref() == Some(result.user_id.as_str());
        if !is_host || result.players.len() < PARTY_MIN_PLAYERS {
            return Ok(None);
        }
        unlock_for_event(service, self.achievement_id(), &result.user_id, &result.game_id)
    }
}

/// Started in last place, finished first.
#[derive(Debug, Default)]
pub struct ComebackKidEvaluator;

impl Evaluator for ComebackKidEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_COMEBACK_KID
    }

    fn event_type(&self) -> EventType {
        EventType::GameFinished
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let Some(result) = finished(event) else {
            return Ok(None);
        };
        let (Some(starting_rank), Some(final_rank)) = (result.starting_rank, result.final_rank)
        else {
            return Ok(None);
        };
        let player_count = result.players.len();
        let started_last = player_count > 0 && starting_rank as usize >= player_count;
        if !started_last || final_rank != 1 {
            return Ok(None);
        }
        unlock_for_event(service, self.achievement_id(), &result.user_id, &result.game_id)
    }
}

/// Perfect long-form accuracy, read through
/// [`GameFinished::resolved_long_form_accuracy`].
#[derive(Debug, Default)]
pub struct ScholarModeEvaluator;

impl Evaluator for ScholarModeEvaluator {
    fn achievement_id(&self) -> &'static str {
        CORE_SCHOLAR_MODE_ACTIVATED
    }

    fn event_type(&self) -> EventType {
        EventType::GameFinished
    }

    fn evaluate(
        &self,
        event: &GameEvent,
        service: &AchievementsService,
    ) -> Result<Option<AchievementUnlock>, AchievementError> {
        let Some(result) = finished(event) else {
            return Ok(None);
        };
        let accuracy = result.resolved_long_form_accuracy();
        if !accuracy.map(|value| value >= SCHOLAR_MIN_ACCURACY).unwrap_or(false) {
            return Ok(None);
        }
        unlock_for_event(service, self.achievement_id(), &result.user_id, &result.game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_service;
    use backend_domain::PlayerScore;
    use serde_json::json;

    fn players(ids: &[&str]) -> Vec<PlayerScore> {
        ids.iter()
            .map(|id| PlayerScore {
                user_id: id.to_string(),
                score: 0.0,
            })
            .collect()
    }

    fn result(user: &str, final_score: f64) -> GameFinished {
        GameFinished {
            user_id: user.to_string(),
            game_id: "g1".to_string(),
            final_score,
            players: players(&[user]),
            host_user_id: None,
            final_rank: None,
            starting_rank: None,
            long_form_accuracy: None,
            metadata: None,
        }
    }

    fn event(result: GameFinished) -> GameEvent {
        GameEvent::GameFinished(result)
    }

    #[test]
    fn five_perfect_games_unlocks_exactly_on_fifth() {
        let service = seeded_service();
        let evaluator = FivePerfectGamesEvaluator::default();
        for _ in 0..4 {
            assert!(evaluator
                .evaluate(&event(result("u1", 100.0)), &service)
                .expect("eval")
                .is_none());
        }
        assert!(!service.has_unlocked("u1", CORE_FIVE_PERFECT_GAMES));
        assert!(evaluator
            .evaluate(&event(result("u1", 100.0)), &service)
            .expect("eval")
            .is_some());
        assert_eq!(service.get_achievements_for_user("u1").len(), 1);
        assert_eq!(evaluator.streak().current("u1"), 0);
    }

    #[test]
    fn five_perfect_games_resets_on_imperfect_finish() {
        let service = seeded_service();
        let evaluator = FivePerfectGamesEvaluator::default();
        let scores = [100.0, 100.0, 90.0, 100.0, 100.0, 100.0, 100.0];
        for score in scores {
            evaluator
                .evaluate(&event(result("u1", score)), &service)
                .expect("eval");
        }
        assert!(!service.has_unlocked("u1", CORE_FIVE_PERFECT_GAMES));
        assert_eq!(evaluator.streak().current("u1"), 4);

        evaluator
            .evaluate(&event(result("u1", 120.0)), &service)
            .expect("eval");
        assert!(service.has_unlocked("u1", CORE_FIVE_PERFECT_GAMES));
    }

    #[test]
    fn party_starter_needs_host_and_four_players() {
        let service = seeded_service();
        let evaluator = PartyStarterEvaluator;

        let mut small = result("host-1", 50.0);
        small.host_user_id = Some("host-1".to_string());
        small.players = players(&["host-1", "a", "b"]);
        assert!(evaluator.evaluate(&event(small), &service).expect("eval").is_none());

        let mut guest = result("guest", 50.0);
        guest.host_user_id = Some("host-1".to_string());
        guest.players = players(&["host-1", "guest", "a", "b", "c"]);
        assert!(evaluator.evaluate(&event(guest), &service).expect("eval").is_none());

        let mut full = result("host-1", 50.0);
        full.host_user_id = Some("host-1".to_string());
        full.players = players(&["host-1", "a", "b", "c"]);
        assert!(evaluator.evaluate(&event(full), &service).expect("eval").is_some());
        assert!(service.has_unlocked("host-1", CORE_PARTY_STARTER));
        assert!(!service.has_unlocked("guest", CORE_PARTY_STARTER));
    }

    #[test]
    fn party_starter_without_host_field_is_a_no_op() {
        let service = seeded_service();
        let mut finish = result("host-1", 50.0);
        finish.players = players(&["host-1", "a", "b", "c"]);
        assert!(PartyStarterEvaluator
            .evaluate(&event(finish), &service)
            .expect("eval")
            .is_none());
    }

    #[test]
    fn comeback_kid_requires_last_to_first() {
        let service = seeded_service();
        let evaluator = ComebackKidEvaluator;

        let mut from_second = result("A", 80.0);
        from_second.players = players(&["A", "B", "C", "D"]);
        from_second.starting_rank = Some(2);
        from_second.final_rank = Some(1);
        assert!(evaluator.evaluate(&event(from_second), &service).expect("eval").is_none());
        assert!(!service.has_unlocked("A", CORE_COMEBACK_KID));

        let mut from_last = result("A", 80.0);
        from_last.players = players(&["A", "B", "C", "D"]);
        from_last.starting_rank = Some(4);
        from_last.final_rank = Some(1);
        assert!(evaluator.evaluate(&event(from_last), &service).expect("eval").is_some());
        assert!(service.has_unlocked("A", CORE_COMEBACK_KID));
    }

    #[test]
    fn comeback_kid_ignores_missing_ranks_and_empty_tables() {
        let service = seeded_service();
        let evaluator = ComebackKidEvaluator;

        let mut no_start = result("A", 80.0);
        no_start.players = players(&["A", "B"]);
        no_start.final_rank = Some(1);
        assert!(evaluator.evaluate(&event(no_start), &service).expect("eval").is_none());

        let mut empty = result("A", 80.0);
        empty.players = Vec::new();
        empty.starting_rank = Some(1);
        empty.final_rank = Some(1);
        assert!(evaluator.evaluate(&event(empty), &service).expect("eval").is_none());

        let mut finished_second = result("A", 80.0);
        finished_second.players = players(&["A", "B"]);
        finished_second.starting_rank = Some(2);
        finished_second.final_rank = Some(2);
        assert!(evaluator
            .evaluate(&event(finished_second), &service)
            .expect("eval")
            .is_none());
    }

    #[test]
    fn scholar_mode_reads_top_level_then_metadata() {
        let service = seeded_service();
        let evaluator = ScholarModeEvaluator;

        let mut partial = result("u1", 80.0);
        partial.long_form_accuracy = Some(0.9);
        partial.metadata = json!({ "longFormAccuracy": 1.0 }).as_object().cloned();
        assert!(evaluator.evaluate(&event(partial), &service).expect("eval").is_none());

        let mut textual = result("u1", 80.0);
        textual.metadata = json!({ "longFormAccuracy": "1.0" }).as_object().cloned();
        assert!(evaluator.evaluate(&event(textual), &service).expect("eval").is_none());

        let mut via_metadata = result("u1", 80.0);
        via_metadata.metadata = json!({ "longFormAccuracy": 1 }).as_object().cloned();
        assert!(evaluator.evaluate(&event(via_metadata), &service).expect("eval").is_some());
        assert!(service.has_unlocked("u1", CORE_SCHOLAR_MODE_ACTIVATED));
    }

    #[test]
    fn scholar_mode_accepts_top_level_accuracy() {
        let service = seeded_service();
        let mut perfect = result("u2", 80.0);
        perfect.long_form_accuracy = Some(1.0);
        assert!(ScholarModeEvaluator
            .evaluate(&event(perfect), &service)
            .expect("eval")
            .is_some());
    }
}
