use backend_domain::{Achievement, GameEvent};
use tracing::{info, warn};

use crate::dtos::IngestSummary;
use crate::{AchievementError, AppState};

/// Registers organization-defined achievements. Core entries are rejected:
/// the core catalog is fixed. Stops at the first invalid or duplicate
/// definition; earlier ones stay registered.
pub fn register_custom_achievements(
    state: &AppState,
    definitions: Vec<Achievement>,
) -> Result<usize, AchievementError> {
    let mut registered = 0;
    for definition in definitions {
        let normalized = definition.normalized();
        if normalized.is_core() {
            warn!("catalog entry {} declares category core", normalized.id);
            return Err(AchievementError::InvalidDefinition(format!(
                "custom catalog entry '{}' must not declare category core",
                normalized.id
            )));
        }
        state.service.register_achievement(normalized)?;
        registered += 1;
    }
    if registered > 0 {
        info!("registered {} custom achievements", registered);
    }
    Ok(registered)
}

/// Emits each event in order. A listener error only aborts when the bus
/// propagates failures.
pub fn ingest_events(state: &AppState, events: &[GameEvent]) -> anyhow::Result<IngestSummary> {
    let unlocks_before = state.metrics.unlocks_recorded();
    let mut summary = IngestSummary::default();
    for event in events {
        let report = state.emit(event)?;
        summary.events += 1;
        summary.listener_failures += report.failed;
    }
    summary.unlocks_recorded = state.metrics.unlocks_recorded() - unlocks_before;
    Ok(summary)
}
