pub mod context;
pub mod lifecycle;
pub mod logging;

pub use context::AppContext;
pub use lifecycle::{run_catalog, run_replay, ReplayOutput};
pub use logging::init_logging;
