// Unlock ledger entities

use serde::{Deserialize, Serialize};

use crate::entities::Achievement;

/// A user satisfied an achievement at `unlocked_at` (Unix epoch millis).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlock {
    pub user_id: String,
    pub achievement_id: String,
    pub unlocked_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockContext {
    pub game_id: Option<String>,
}

impl UnlockContext {
    pub fn for_game(game_id: &str) -> Self {
        let trimmed = game_id.trim();
        Self {
            game_id: if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            },
        }
    }
}

/// Read-only view joining a definition to one of the user's unlocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAchievementState {
    pub achievement: Achievement,
    pub unlock: AchievementUnlock,
}
