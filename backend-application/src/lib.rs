// Backend Application Layer

pub mod commands;
pub mod dtos;
pub mod error;
pub mod evaluators;
pub mod metrics;
pub mod ops;
pub mod queries;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AchievementError;
pub use metrics::Metrics;
pub use services::AchievementsService;
pub use state::AppState;
