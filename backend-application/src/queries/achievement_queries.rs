use std::collections::HashSet;

use backend_domain::Achievement;

use crate::dtos::{UnlockedEntry, UserAchievementReport};
use crate::AppState;

/// Core achievements, then `organization_id`'s custom ones when given.
pub fn list_catalog(state: &AppState, organization_id: Option<&str>) -> Vec<Achievement> {
    let mut catalog = state.service.get_all_core_achievements();
    if let Some(org) = organization_id.map(str::trim).filter(|org| !org.is_empty()) {
        catalog.extend(state.service.get_custom_achievements_for_org(org));
    }
    catalog
}

pub fn user_report(
    state: &AppState,
    user_id: &str,
    organization_id: Option<&str>,
) -> UserAchievementReport {
    let unlocked = state
        .service
        .get_achievements_for_user(user_id)
        .into_iter()
        .map(UnlockedEntry::from)
        .collect::<Vec<_>>();
    let unlocked_ids = unlocked
        .iter()
        .map(|entry| entry.achievement_id.as_str())
        .collect::<HashSet<_>>();
    let locked = list_catalog(state, organization_id)
        .into_iter()
        .filter(|achievement| !unlocked_ids.contains(achievement.id.as_str()))
        .collect();
    UserAchievementReport {
        user_id: user_id.to_string(),
        unlocked,
        locked,
    }
}
