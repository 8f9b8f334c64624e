use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use backend_infrastructure::AppConfig;

pub const LOG_FILE_PREFIX: &str = "trivia-achievements.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// machine-readable; with `log_dir` set they are also written to a daily
/// rolling file. Keep the returned guard alive until exit to flush the file.
pub fn init_logging(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(if config.log_json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    });

    let mut guard = None;
    if let Some(dir) = &config.log_dir {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        layers.push(if config.log_json {
            fmt::layer().json().with_ansi(false).with_writer(writer).boxed()
        } else {
            fmt::layer().with_ansi(false).with_writer(writer).boxed()
        });
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;
    Ok(guard)
}
