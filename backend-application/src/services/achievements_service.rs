use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use backend_domain::{
    Achievement, AchievementCategory, AchievementRepository, AchievementUnlock, Clock,
    UnlockContext, UnlockRepository, UserAchievementState,
};
use tracing::{debug, info};

use crate::{AchievementError, Metrics};

/// Business rules over the definition store and the unlock ledger.
///
/// The service is the only writer of the ledger. Non-repeatable achievements
/// unlock at most once per user; asking again hands back the original record.
pub struct AchievementsService {
    achievements: Arc<dyn AchievementRepository>,
    unlocks: Arc<dyn UnlockRepository>,
    clock: Arc<dyn Clock>,
    metrics: Arc<Metrics>,
    ledger_guard: Mutex<()>,
    last_unlocked_at: AtomicI64,
}

impl AchievementsService {
    pub fn new(
        achievements: Arc<dyn AchievementRepository>,
        unlocks: Arc<dyn UnlockRepository>,
        clock: Arc<dyn Clock>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            achievements,
            unlocks,
            clock,
            metrics,
            ledger_guard: Mutex::new(()),
            last_unlocked_at: AtomicI64::new(i64::MIN),
        }
    }

    pub fn register_achievement(&self, definition: Achievement) -> Result<(), AchievementError> {
        validate_definition(&definition)?;
        let _guard = self.ledger_guard.lock().unwrap_or_else(|e| e.into_inner());
        if self.achievements.get_by_id(&definition.id).is_some() {
            return Err(AchievementError::DuplicateDefinition(definition.id));
        }
        info!(
            "registered achievement {} ({}{})",
            definition.id,
            definition.category,
            definition
                .organization_id
                .as_deref()
                .map(|org| format!(", org={}", org))
                .unwrap_or_default()
        );
        self.achievements.save(definition);
        self.metrics.record_definition();
        Ok(())
    }

    pub fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        context: Option<UnlockContext>,
    ) -> Result<AchievementUnlock, AchievementError> {
        let achievement = self
            .achievements
            .get_by_id(achievement_id)
            .ok_or_else(|| AchievementError::UnknownAchievement(achievement_id.to_string()))?;

        let _guard = self.ledger_guard.lock().unwrap_or_else(|e| e.into_inner());
        if !achievement.repeatable && self.unlocks.has_unlock(user_id, achievement_id) {
            let existing = self
                .unlocks
                .get_for_user(user_id)
                .into_iter()
                .find(|unlock| unlock.achievement_id == achievement_id)
                .ok_or_else(|| AchievementError::MissingUnlockRecord {
                    user_id: user_id.to_string(),
                    achievement_id: achievement_id.to_string(),
                })?;
            self.metrics.record_repeat_unlock();
            debug!("{} already unlocked {}", user_id, achievement_id);
            return Ok(existing);
        }

        let unlock = AchievementUnlock {
            user_id: user_id.to_string(),
            achievement_id: achievement_id.to_string(),
            unlocked_at: self.next_timestamp(),
            game_id: context.and_then(|ctx| ctx.game_id),
        };
        self.unlocks.add(unlock.clone());
        self.metrics.record_unlock();
        info!(
            "unlocked {} for {} (game={})",
            achievement_id,
            user_id,
            unlock.game_id.as_deref().unwrap_or("-")
        );
        Ok(unlock)
    }

    pub fn has_unlocked(&self, user_id: &str, achievement_id: &str) -> bool {
        self.unlocks.has_unlock(user_id, achievement_id)
    }

    pub fn get_achievements_for_user(&self, user_id: &str) -> Vec<UserAchievementState> {
        self.unlocks
            .get_for_user(user_id)
            .into_iter()
            .filter_map(|unlock| {
                let achievement = self.achievements.get_by_id(&unlock.achievement_id)?;
                Some(UserAchievementState {
                    achievement,
                    unlock,
                })
            })
            .collect()
    }

    pub fn get_achievement(&self, achievement_id: &str) -> Option<Achievement> {
        self.achievements.get_by_id(achievement_id)
    }

    pub fn get_all_core_achievements(&self) -> Vec<Achievement> {
        self.achievements.list_core()
    }

    pub fn get_custom_achievements_for_org(&self, organization_id: &str) -> Vec<Achievement> {
        self.achievements.list_custom_for_org(organization_id)
    }

    // Caller holds ledger_guard.
    fn next_timestamp(&self) -> i64 {
        let now = self.clock.now_millis();
        let previous = self.last_unlocked_at.load(Ordering::Relaxed);
        let timestamp = now.max(previous);
        self.last_unlocked_at.store(timestamp, Ordering::Relaxed);
        timestamp
    }
}

fn validate_definition(definition: &Achievement) -> Result<(), AchievementError> {
    if definition.id.trim().is_empty() {
        return Err(AchievementError::InvalidDefinition(
            "id must not be empty".to_string(),
        ));
    }
    let organization_id = definition
        .organization_id
        .as_deref()
        .filter(|org| !org.trim().is_empty());
    match (definition.category, organization_id) {
        (AchievementCategory::Core, Some(org)) => Err(AchievementError::InvalidDefinition(format!(
            "core achievement '{}' must not carry organization_id '{}'",
            definition.id, org
        ))),
        (AchievementCategory::Core, None) if definition.organization_id.is_some() => {
            Err(AchievementError::InvalidDefinition(format!(
                "core achievement '{}' must not carry organization_id",
                definition.id
            )))
        }
        (AchievementCategory::Custom, None) => Err(AchievementError::InvalidDefinition(format!(
            "custom achievement '{}' requires a non-empty organization_id",
            definition.id
        ))),
        _ => Ok(()),
    }
}
