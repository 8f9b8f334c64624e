use async_trait::async_trait;

use crate::entities::{Achievement, AchievementUnlock, GameEvent};

/// Definition storage. Upserts by id and performs no validation.
pub trait AchievementRepository: Send + Sync {
    fn save(&self, achievement: Achievement);
    fn get_by_id(&self, id: &str) -> Option<Achievement>;
    fn list_all(&self) -> Vec<Achievement>;
    fn list_core(&self) -> Vec<Achievement>;
    fn list_custom_for_org(&self, organization_id: &str) -> Vec<Achievement>;
}

/// Append-only unlock ledger. No dedup; returned vectors are owned copies.
pub trait UnlockRepository: Send + Sync {
    fn add(&self, unlock: AchievementUnlock);
    fn get_for_user(&self, user_id: &str) -> Vec<AchievementUnlock>;
    fn has_unlock(&self, user_id: &str, achievement_id: &str) -> bool;
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_custom_achievements(&self, path: &str) -> anyhow::Result<Vec<Achievement>>;
    async fn load_event_log(&self, path: &str) -> anyhow::Result<Vec<GameEvent>>;
}
