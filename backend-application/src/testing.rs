// Test doubles shared by the application tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use backend_domain::{
    core_achievements, Achievement, AchievementRepository, AchievementUnlock, Clock,
    UnlockRepository,
};

use crate::{AchievementsService, Metrics};

#[derive(Default)]
pub struct MapAchievements(RwLock<HashMap<String, Achievement>>);

impl AchievementRepository for MapAchievements {
    fn save(&self, achievement: Achievement) {
        self.0
            .write()
            .expect("lock")
            .insert(achievement.id.clone(), achievement);
    }

    fn get_by_id(&self, id: &str) -> Option<Achievement> {
        self.0.read().expect("lock").get(id).cloned()
    }

    fn list_all(&self) -> Vec<Achievement> {
        let mut all: Vec<_> = self.0.read().expect("lock").values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    fn list_core(&self) -> Vec<Achievement> {
        self.list_all().into_iter().filter(|a| a.is_core()).collect()
    }

    fn list_custom_for_org(&self, organization_id: &str) -> Vec<Achievement> {
        self.list_all()
            .into_iter()
            .filter(|a| a.belongs_to(organization_id))
            .collect()
    }
}

#[derive(Default)]
pub struct VecUnlocks(RwLock<Vec<AchievementUnlock>>);

impl UnlockRepository for VecUnlocks {
    fn add(&self, unlock: AchievementUnlock) {
        self.0.write().expect("lock").push(unlock);
    }

    fn get_for_user(&self, user_id: &str) -> Vec<AchievementUnlock> {
        self.0
            .read()
            .expect("lock")
            .iter()
            .filter(|u| u.user_id == user_id)
            .cloned()
            .collect()
    }

    fn has_unlock(&self, user_id: &str, achievement_id: &str) -> bool {
        self.0
            .read()
            .expect("lock")
            .iter()
            .any(|u| u.user_id == user_id && u.achievement_id == achievement_id)
    }
}

/// Hands out the given instants in order, then repeats the last one.
pub struct StepClock {
    values: Mutex<Vec<i64>>,
}

impl StepClock {
    pub fn new(mut values: Vec<i64>) -> Self {
        values.reverse();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        let mut values = self.values.lock().expect("lock");
        if values.len() > 1 {
            values.pop().unwrap_or_default()
        } else {
            values.last().copied().unwrap_or_default()
        }
    }
}

pub fn service_with(clock: Vec<i64>, unlocks: Arc<dyn UnlockRepository>) -> AchievementsService {
    let service = AchievementsService::new(
        Arc::new(MapAchievements::default()),
        unlocks,
        Arc::new(StepClock::new(clock)),
        Arc::new(Metrics::default()),
    );
    for achievement in core_achievements() {
        service.register_achievement(achievement).expect("seed core");
    }
    service
}

pub fn seeded_service() -> AchievementsService {
    service_with(vec![1_000], Arc::new(VecUnlocks::default()))
}
