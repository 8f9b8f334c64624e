// Achievement definition entity

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{AchievementCategory, AchievementTrigger};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: AchievementCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub repeatable: bool,
    pub trigger: AchievementTrigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl Achievement {
    pub fn core(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        trigger: AchievementTrigger,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: Some(description.into()),
            category: AchievementCategory::Core,
            organization_id: None,
            repeatable: false,
            trigger,
            metadata: None,
        }
    }

    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        organization_id: impl Into<String>,
        trigger: AchievementTrigger,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: AchievementCategory::Custom,
            organization_id: Some(organization_id.into()),
            repeatable: false,
            trigger,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn is_core(&self) -> bool {
        self.category == AchievementCategory::Core
    }

    pub fn belongs_to(&self, organization_id: &str) -> bool {
        self.category == AchievementCategory::Custom
            && self.organization_id.as_deref() == Some(organization_id)
    }

    /// Trims identifiers and drops blank optional text, the same shape
    /// definitions take whether they come from code or a catalog file.
    pub fn normalized(mut self) -> Self {
        self.id = self.id.trim().to_string();
        self.name = self.name.trim().to_string();
        self.description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        self.organization_id = self
            .organization_id
            .map(|org| org.trim().to_string())
            .filter(|org| !org.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_and_drops_blank_fields() {
        let mut achievement = Achievement::custom(" quiz_master ", " Quiz Master ", "  ", AchievementTrigger::GameResult);
        achievement.description = Some("   ".to_string());
        let normalized = achievement.normalized();
        assert_eq!(normalized.id, "quiz_master");
        assert_eq!(normalized.name, "Quiz Master");
        assert_eq!(normalized.description, None);
        assert_eq!(normalized.organization_id, None);
    }

    #[test]
    fn belongs_to_requires_custom_category() {
        let custom = Achievement::custom("c1", "C1", "org-a", AchievementTrigger::GameStart);
        assert!(custom.belongs_to("org-a"));
        assert!(!custom.belongs_to("org-b"));

        let mut core = Achievement::core("k1", "K1", "core", AchievementTrigger::GameStart);
        core.organization_id = Some("org-a".to_string());
        assert!(!core.belongs_to("org-a"));
    }

    #[test]
    fn deserializes_snake_case_definition() {
        let achievement: Achievement = serde_json::from_value(serde_json::json!({
            "id": "office_champion",
            "name": "Office Champion",
            "category": "custom",
            "organization_id": "acme",
            "repeatable": true,
            "trigger": "game_result",
            "metadata": { "tier": "gold" }
        }))
        .expect("deserialize achievement");
        assert_eq!(achievement.category, AchievementCategory::Custom);
        assert_eq!(achievement.organization_id.as_deref(), Some("acme"));
        assert!(achievement.repeatable);
        assert_eq!(achievement.trigger, AchievementTrigger::GameResult);
        assert_eq!(achievement.description, None);
    }
}
