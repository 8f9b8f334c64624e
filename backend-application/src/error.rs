use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AchievementError {
    #[error("achievement '{0}' is already registered")]
    DuplicateDefinition(String),
    #[error("invalid achievement definition: {0}")]
    InvalidDefinition(String),
    #[error("unknown achievement '{0}'")]
    UnknownAchievement(String),
    #[error("ledger reports '{achievement_id}' unlocked for '{user_id}' but holds no record")]
    MissingUnlockRecord {
        user_id: String,
        achievement_id: String,
    },
}
