use std::path::Path;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use backend_domain::{Achievement, CatalogSource, GameEvent};

/// Reads custom achievement catalogs (YAML) and recorded event logs (JSON lines).
pub struct CatalogFileRepository;

impl CatalogFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CatalogFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for CatalogFileRepository {
    async fn load_custom_achievements(&self, path: &str) -> anyhow::Result<Vec<Achievement>> {
        if !Path::new(path).exists() {
            warn!("custom achievement catalog {} not found, skipping", path);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let achievements: Vec<Achievement> = serde_yaml::from_str(&content)
            .map_err(|err| anyhow!("invalid achievement catalog {}: {}", path, err))?;
        debug!("loaded {} custom achievements from {}", achievements.len(), path);
        Ok(achievements)
    }

    async fn load_event_log(&self, path: &str) -> anyhow::Result<Vec<GameEvent>> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|err| anyhow!("cannot read event log {}: {}", path, err))?;
        let mut events = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let event: GameEvent = serde_json::from_str(line)
                .map_err(|err| anyhow!("{}:{}: invalid event: {}", path, index + 1, err))?;
            events.push(event);
        }
        debug!("loaded {} events from {}", events.len(), path);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{AchievementCategory, EventType};

    async fn write_temp(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!("trivia-{}-{}", std::process::id(), name));
        fs::write(&path, content).await.expect("write temp file");
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn loads_yaml_catalog() {
        let path = write_temp(
            "catalog.yaml",
            r#"
- id: acme_night_owl
  name: Night Owl
  description: Play after midnight
  category: custom
  organization_id: acme
  trigger: game_start
- id: acme_regular
  name: Regular
  category: custom
  organization_id: acme
  repeatable: true
  trigger: session_history
"#,
        )
        .await;
        let achievements = CatalogFileRepository::new()
            .load_custom_achievements(&path)
            .await
            .expect("load catalog");
        assert_eq!(achievements.len(), 2);
        assert_eq!(achievements[0].category, AchievementCategory::Custom);
        assert!(!achievements[0].repeatable);
        assert!(achievements[1].repeatable);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_catalog_is_empty() {
        let achievements = CatalogFileRepository::new()
            .load_custom_achievements("/nonexistent/trivia/catalog.yaml")
            .await
            .expect("missing is fine");
        assert!(achievements.is_empty());
    }

    #[tokio::test]
    async fn loads_event_log_skipping_blank_lines() {
        let path = write_temp(
            "events.jsonl",
            concat!(
                "{\"type\":\"GAME_CREATED\",\"userId\":\"host\",\"gameId\":\"g1\"}\n",
                "\n",
                "{\"type\":\"QUESTION_ANSWERED\",\"userId\":\"p1\",\"gameId\":\"g1\",\"correct\":true,\"answerTimeMs\":800}\n",
            ),
        )
        .await;
        let events = CatalogFileRepository::new()
            .load_event_log(&path)
            .await
            .expect("load events");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), EventType::GameCreated);
        assert_eq!(events[1].user_id(), "p1");
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_event_line_names_its_line() {
        let path = write_temp(
            "bad-events.jsonl",
            "{\"type\":\"GAME_JOINED\",\"userId\":\"p1\",\"gameId\":\"g1\"}\n{\"type\":\"GAME_JOINED\"}\n",
        )
        .await;
        let err = CatalogFileRepository::new()
            .load_event_log(&path)
            .await
            .expect_err("malformed");
        assert!(err.to_string().contains(":2:"));
        let _ = fs::remove_file(&path).await;
    }
}
