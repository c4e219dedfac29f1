use std::path::PathBuf;
use std::sync::Arc;

use bee_config::Config;
use bee_core::storage::FileStorage;
use bee_gemini::GeminiAssistant;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::profile::ProfileDir;
use self::state::AppState;

/// Spelling practice buddy: keep a word list, look words up, hear them spoken
#[derive(Parser, Debug)]
#[command(name = "bee", version)]
struct Cli {
    /// Profile to load from the config folder
    #[arg(long, default_value = "main")]
    profile: String,
    /// Create a profile cloned from main and exit
    #[arg(long, value_name = "NAME")]
    new_profile: Option<String>,
    /// Where the word list and saved definitions live
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Give up on a lookup after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine, the environment may already be set
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let profiles = ProfileDir::default_location();
    if let Err(e) = profiles.init_user_config() {
        tracing::warn!("Could not create the main profile: {:#}", e);
    }

    if let Some(name) = &cli.new_profile {
        let path = profiles.add_profile_from_default(name)?;
        println!("Created profile '{name}' at {}", path.display());
        return Ok(());
    }

    let config = load_config(&profiles, &cli);
    let capacity = config.channel_capacity;

    tracing::info!("Word list stored in {}", config.storage.data_dir);
    let storage = Arc::new(FileStorage::new(config.storage.data_path()));
    let assistant = Arc::new(GeminiAssistant::new(&config.assistant));

    let cancel = CancellationToken::new();
    let state = Arc::new(AppState::new(config, storage, assistant, cancel));

    let controller = AppController::new(state, capacity);
    let mut tasks = controller.spawn_tasks().await;
    // Never joined: it sits in a blocking stdin read and dies with the process
    let _input = controller.spawn_input();

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Task ended with error during shutdown: {:#}", e),
            Err(e) => tracing::error!("Task panicked during shutdown: {}", e),
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Profile values with command line overrides applied on top
fn load_config(profiles: &ProfileDir, cli: &Cli) -> Config {
    let mut config = profiles.load_user_profile(&cli.profile).unwrap_or_else(|e| {
        tracing::warn!("Profile '{}' is unreadable, using defaults: {:#}", cli.profile, e);
        Config::new()
    });

    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(ms) = cli.timeout_ms {
        config.lookup_timeout_ms = ms;
    }

    config
}
