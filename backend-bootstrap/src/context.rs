use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::commands::achievement_commands::register_custom_achievements;
use backend_application::AppState;
use backend_domain::CatalogSource;
use backend_infrastructure::{
    AppConfig, CatalogFileRepository, InMemoryAchievementRepository, InMemoryUnlockRepository,
    SystemClock,
};

/// Everything one process needs, constructed once at startup and passed by
/// reference to whoever produces events or renders unlock state.
pub struct AppContext {
    pub state: AppState,
    pub catalog_source: Arc<dyn CatalogSource>,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let state = AppState::bootstrap(
            Arc::new(InMemoryAchievementRepository::new()),
            Arc::new(InMemoryUnlockRepository::new()),
            Arc::new(SystemClock),
            config.failure_policy(),
        )?;

        let catalog_source: Arc<dyn CatalogSource> = Arc::new(CatalogFileRepository::new());
        let custom = catalog_source
            .load_custom_achievements(&config.custom_achievements_path)
            .await?;
        let registered = register_custom_achievements(&state, custom)?;
        info!(
            "context ready: custom_achievements={} from {}",
            registered, config.custom_achievements_path
        );

        Ok(Self {
            state,
            catalog_source,
        })
    }
}
