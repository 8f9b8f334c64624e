use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use backend_bootstrap::{init_logging, run_catalog, run_replay, AppContext};
use backend_infrastructure::{AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "trivia-achievements")]
#[command(about = "Party trivia achievement engine", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the achievement catalog as JSON
    Catalog {
        /// Include this organization's custom achievements
        #[arg(long)]
        org: Option<String>,
    },
    /// Replay a JSON-lines event log and print each user's unlock state
    Replay {
        /// Path to the event log
        #[arg(short, long)]
        events: String,
        /// Only report this user
        #[arg(long)]
        user: Option<String>,
        /// Include this organization's custom achievements in the report
        #[arg(long)]
        org: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }
    let config = AppConfig::load().await?;
    let _log_guard = init_logging(&config)?;
    info!("config loaded from {}", AppConfig::config_path());

    let context = AppContext::new(&config).await?;
    match args.command {
        Command::Catalog { org } => {
            let catalog = run_catalog(&context, org.as_deref());
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Command::Replay { events, user, org } => {
            let output = run_replay(&context, &events, user.as_deref(), org.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            info!("metrics\n{}", context.state.metrics.render_prometheus());
        }
    }
    Ok(())
}
