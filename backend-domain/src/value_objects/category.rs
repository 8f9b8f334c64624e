// Achievement category value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Ships with the product; never scoped to an organization.
    Core,
    /// Defined by an organization; always carries its organization id.
    Custom,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Core => "core",
            AchievementCategory::Custom => "custom",
        }
    }
}

impl std::fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_category() {
        let parsed = serde_json::from_str::<AchievementCategory>("\"seasonal\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&AchievementCategory::Custom).expect("serialize");
        assert_eq!(json, "\"custom\"");
    }
}
