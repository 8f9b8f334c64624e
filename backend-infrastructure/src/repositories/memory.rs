use std::collections::HashMap;
use std::sync::RwLock;

use backend_domain::{Achievement, AchievementRepository, AchievementUnlock, UnlockRepository};

#[derive(Default)]
struct AchievementTable {
    order: Vec<String>,
    by_id: HashMap<String, Achievement>,
}

/// Definitions kept in registration order. `save` overwrites in place.
#[derive(Default)]
pub struct InMemoryAchievementRepository {
    table: RwLock<AchievementTable>,
}

impl InMemoryAchievementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F>(&self, keep: F) -> Vec<Achievement>
    where
        F: Fn(&Achievement) -> bool,
    {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id))
            .filter(|achievement| keep(*achievement))
            .cloned()
            .collect()
    }
}

impl AchievementRepository for InMemoryAchievementRepository {
    fn save(&self, achievement: Achievement) {
        let mut table = self.table.write().unwrap_or_else(|e| e.into_inner());
        if !table.by_id.contains_key(&achievement.id) {
            table.order.push(achievement.id.clone());
        }
        table.by_id.insert(achievement.id.clone(), achievement);
    }

    fn get_by_id(&self, id: &str) -> Option<Achievement> {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        table.by_id.get(id).cloned()
    }

    fn list_all(&self) -> Vec<Achievement> {
        self.collect(|_| true)
    }

    fn list_core(&self) -> Vec<Achievement> {
        self.collect(Achievement::is_core)
    }

    fn list_custom_for_org(&self, organization_id: &str) -> Vec<Achievement> {
        self.collect(|achievement| achievement.belongs_to(organization_id))
    }
}

/// Append-only ledger grouped by user, insertion order preserved.
#[derive(Default)]
pub struct InMemoryUnlockRepository {
    by_user: RwLock<HashMap<String, Vec<AchievementUnlock>>>,
}

impl InMemoryUnlockRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnlockRepository for InMemoryUnlockRepository {
    fn add(&self, unlock: AchievementUnlock) {
        let mut by_user = self.by_user.write().unwrap_or_else(|e| e.into_inner());
        by_user
            .entry(unlock.user_id.clone())
            .or_default()
            .push(unlock);
    }

    fn get_for_user(&self, user_id: &str) -> Vec<AchievementUnlock> {
        let by_user = self.by_user.read().unwrap_or_else(|e| e.into_inner());
        by_user.get(user_id).cloned().unwrap_or_default()
    }

    fn has_unlock(&self, user_id: &str, achievement_id: &str) -> bool {
        let by_user = self.by_user.read().unwrap_or_else(|e| e.into_inner());
        by_user
            .get(user_id)
            .map(|unlocks| {
                unlocks
                    .iter()
                    .any(|unlock| unlock.achievement_id == achievement_id)
            })
            .unwrap_or(false)
    }
}
