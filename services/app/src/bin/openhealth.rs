//! services/app/src/bin/openhealth.rs

use app_lib::{config::Config, error::AppError, state::AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(storage_dir = %config.storage_dir.display(), "configuration loaded");

    // --- 2. Build the Shared AppState ---
    let poll_interval = config.poll_interval;
    let state = AppState::from_config(config)?;
    match &state.backend {
        Some(_) => info!("remote backend configured"),
        None => info!("no remote backend configured, running on local persistence only"),
    }

    // --- 3. Restore the Session ---
    state.auth.restore();
    match state.auth.current_user() {
        Some(user) => info!(email = %user.email, "signed in as {}", user.name),
        None => info!("no active session"),
    }

    // --- 4. Start the Collaboration Watcher ---
    let hub = state.collaboration();
    let (mut threads_rx, watcher) = hub.watch(poll_interval);
    let observer = tokio::spawn(async move {
        while threads_rx.changed().await.is_ok() {
            let threads = threads_rx.borrow_and_update().clone();
            let messages: usize = threads.iter().map(|t| t.messages.len()).sum();
            info!(threads = threads.len(), messages, "collaboration store observed");
        }
    });

    // --- 5. Run Until Interrupted ---
    info!("openhealth running, press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    watcher.abort();
    observer.abort();
    info!("shut down");
    Ok(())
}
