pub mod achievements_service;

pub use achievements_service::*;
