// Gameplay events
// Produced by game screens, consumed by achievement evaluators

use serde::{Deserialize, Serialize};

use crate::value_objects::EventType;

/// Key under `GameFinished.metadata` consulted when the top-level accuracy is absent.
pub const LONG_FORM_ACCURACY_METADATA_KEY: &str = "longFormAccuracy";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    GameCreated(GameCreated),
    GameJoined(GameJoined),
    QuestionAnswered(QuestionAnswered),
    GameFinished(GameFinished),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCreated {
    pub user_id: String,
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameJoined {
    pub user_id: String,
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswered {
    pub user_id: String,
    pub game_id: String,
    pub correct: bool,
    pub answer_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub user_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFinished {
    pub user_id: String,
    pub game_id: String,
    pub final_score: f64,
    #[serde(default)]
    pub players: Vec<PlayerScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_form_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GameEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            GameEvent::GameCreated(_) => EventType::GameCreated,
            GameEvent::GameJoined(_) => EventType::GameJoined,
            GameEvent::QuestionAnswered(_) => EventType::QuestionAnswered,
            GameEvent::GameFinished(_) => EventType::GameFinished,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            GameEvent::GameCreated(payload) => &payload.user_id,
            GameEvent::GameJoined(payload) => &payload.user_id,
            GameEvent::QuestionAnswered(payload) => &payload.user_id,
            GameEvent::GameFinished(payload) => &payload.user_id,
        }
    }

    pub fn game_id(&self) -> &str {
        match self {
            GameEvent::GameCreated(payload) => &payload.game_id,
            GameEvent::GameJoined(payload) => &payload.game_id,
            GameEvent::QuestionAnswered(payload) => &payload.game_id,
            GameEvent::GameFinished(payload) => &payload.game_id,
        }
    }
}

impl QuestionAnswered {
    /// Answer time in millis, or `None` when the producer sent a negative or non-finite value.
    pub fn valid_answer_time_ms(&self) -> Option<f64> {
        if self.answer_time_ms.is_finite() && self.answer_time_ms >= 0.0 {
            Some(self.answer_time_ms)
        } else {
            None
        }
    }
}

impl GameFinished {
    /// Long-form accuracy for this result.
    ///
    /// Precedence:
    /// 1. the top-level `longFormAccuracy` field, when present and finite;
    /// 2. otherwise `metadata.longFormAccuracy`, when it is a JSON number.
    ///
    /// Anything else resolves to `None`.
    pub fn resolved_long_form_accuracy(&self) -> Option<f64> {
        if let Some(value) = self.long_form_accuracy.filter(|value| value.is_finite()) {
            return Some(value);
        }
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get(LONG_FORM_ACCURACY_METADATA_KEY))
            .and_then(serde_json::Value::as_f64)
            .filter(|value| value.is_finite())
    }
}
