// Views handed to UI consumers and the CLI

use backend_domain::{millis_to_utc, Achievement, UserAchievementState};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UnlockedEntry {
    pub achievement_id: String,
    pub name: String,
    pub repeatable: bool,
    pub unlocked_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at_utc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

impl From<UserAchievementState> for UnlockedEntry {
    fn from(state: UserAchievementState) -> Self {
        Self {
            achievement_id: state.achievement.id,
            name: state.achievement.name,
            repeatable: state.achievement.repeatable,
            unlocked_at: state.unlock.unlocked_at,
            unlocked_at_utc: millis_to_utc(state.unlock.unlocked_at)
                .map(|instant| instant.to_rfc3339()),
            game_id: state.unlock.game_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAchievementReport {
    pub user_id: String,
    pub unlocked: Vec<UnlockedEntry>,
    pub locked: Vec<Achievement>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub events: usize,
    pub listener_failures: usize,
    pub unlocks_recorded: u64,
}
