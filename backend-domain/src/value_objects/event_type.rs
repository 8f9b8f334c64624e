// Event type tag value object

use serde::{Deserialize, Serialize};

/// Tag of a [`GameEvent`](crate::GameEvent); the bus keys its listener table by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    GameCreated,
    GameJoined,
    QuestionAnswered,
    GameFinished,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::GameCreated,
        EventType::GameJoined,
        EventType::QuestionAnswered,
        EventType::GameFinished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::GameCreated => "GAME_CREATED",
            EventType::GameJoined => "GAME_JOINED",
            EventType::QuestionAnswered => "QUESTION_ANSWERED",
            EventType::GameFinished => "GAME_FINISHED",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
