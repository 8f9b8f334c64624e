// Achievement trigger value object

use serde::{Deserialize, Serialize};

/// The moment in a game's life an achievement is judged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementTrigger {
    GameStart,
    GameResult,
    SessionHistory,
}

impl AchievementTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementTrigger::GameStart => "game_start",
            AchievementTrigger::GameResult => "game_result",
            AchievementTrigger::SessionHistory => "session_history",
        }
    }
}

impl std::fmt::Display for AchievementTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
