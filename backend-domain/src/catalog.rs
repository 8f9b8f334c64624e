// Fixed catalog of core achievements

use crate::entities::Achievement;
use crate::value_objects::AchievementTrigger;

pub const CORE_UNDER_1S_CORRECT: &str = "core_under_1s_correct";
pub const CORE_LIGHTNING_ROUND: &str = "core_lightning_round";
pub const CORE_FIRST_GAME_CREATED: &str = "core_first_game_created";
pub const CORE_FIRST_GAME_JOINED: &str = "core_first_game_joined";
pub const CORE_FIVE_PERFECT_GAMES: &str = "core_five_perfect_games";
pub const CORE_PARTY_STARTER: &str = "core_party_starter";
pub const CORE_COMEBACK_KID: &str = "core_comeback_kid";
pub const CORE_SCHOLAR_MODE_ACTIVATED: &str = "core_scholar_mode_activated";

pub fn core_achievements() -> Vec<Achievement> {
    vec![
        Achievement::core(
            CORE_FIRST_GAME_CREATED,
            "Game Master",
            "Create your first game.",
            AchievementTrigger::GameStart,
        ),
        Achievement::core(
            CORE_FIRST_GAME_JOINED,
            "Joined the Party",
            "Join your first game.",
            AchievementTrigger::GameStart,
        ),
        Achievement::core(
            CORE_UNDER_1S_CORRECT,
            "Quick Draw",
            "Answer a question correctly in under one second.",
            AchievementTrigger::GameResult,
        ),
        Achievement::core(
            CORE_LIGHTNING_ROUND,
            "Lightning Round",
            "Answer three questions in a row correctly, each within 1.5 seconds.",
            AchievementTrigger::GameResult,
        ),
        Achievement::core(
            CORE_FIVE_PERFECT_GAMES,
            "Perfectionist",
            "Finish five games in a row with a perfect score.",
            AchievementTrigger::SessionHistory,
        ),
        Achievement::core(
            CORE_PARTY_STARTER,
            "Party Starter",
            "Host a game with at least four players.",
            AchievementTrigger::GameResult,
        ),
        Achievement::core(
            CORE_COMEBACK_KID,
            "Comeback Kid",
            "Win a game after starting in last place.",
            AchievementTrigger::GameResult,
        ),
        Achievement::core(
            CORE_SCHOLAR_MODE_ACTIVATED,
            "Scholar Mode",
            "Finish a long-form game with perfect accuracy.",
            AchievementTrigger::GameResult,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn core_catalog_ids_are_unique_and_core_scoped() {
        let catalog = core_achievements();
        let ids: HashSet<_> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 8);
        assert!(catalog
            .iter()
            .all(|a| a.is_core() && a.organization_id.is_none() && !a.repeatable));
    }
}
