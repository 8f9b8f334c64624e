use anyhow::Result;
use serde::Serialize;
use tracing::info;

use backend_application::commands::achievement_commands::ingest_events;
use backend_application::dtos::{IngestSummary, UserAchievementReport};
use backend_application::queries::achievement_queries::{list_catalog, user_report};
use backend_domain::{Achievement, GameEvent};

use crate::context::AppContext;

#[derive(Debug, Serialize)]
pub struct ReplayOutput {
    pub summary: IngestSummary,
    pub users: Vec<UserAchievementReport>,
}

pub fn run_catalog(context: &AppContext, organization_id: Option<&str>) -> Vec<Achievement> {
    list_catalog(&context.state, organization_id)
}

/// Replays a recorded event log through the engine and reports the unlock
/// state of `user_id`, or of every user seen in the log.
pub async fn run_replay(
    context: &AppContext,
    events_path: &str,
    user_id: Option<&str>,
    organization_id: Option<&str>,
) -> Result<ReplayOutput> {
    let events = context.catalog_source.load_event_log(events_path).await?;
    let summary = ingest_events(&context.state, &events)?;
    info!(
        "replayed {} events: unlocks={}, listener_failures={}",
        summary.events, summary.unlocks_recorded, summary.listener_failures
    );

    let users = match user_id {
        Some(user) => vec![user.to_string()],
        None => users_in_order(&events),
    };
    let reports = users
        .iter()
        .map(|user| user_report(&context.state, user, organization_id))
        .collect();
    Ok(ReplayOutput {
        summary,
        users: reports,
    })
}

fn users_in_order(events: &[GameEvent]) -> Vec<String> {
    let mut users: Vec<String> = Vec::new();
    for event in events {
        let user = event.user_id();
        if !users.iter().any(|seen| seen == user) {
            users.push(user.to_string());
        }
    }
    users
}
