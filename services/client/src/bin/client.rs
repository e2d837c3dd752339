//! services/client/src/bin/client.rs

use client_lib::{
    adapters::{HttpPredictionAdapter, JsonFileStore},
    config::Config,
    error::ClientError,
    terminal::{commands::HELP, run_session, spawn_toast_printer, TerminalView},
};
use sentiment_core::{AnalysisController, DraftAutosaver, InputBuffer, NotificationCenter};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting client...");

    let view = Arc::new(TerminalView::new(std::io::stdout()));

    // --- 2. Restore the Draft From the Previous Session ---
    let store = Arc::new(JsonFileStore::new(config.draft_store_path.clone()));
    let autosaver = DraftAutosaver::new(store);
    let saved = autosaver.load();
    let mut buffer = InputBuffer::with_autosave(autosaver);
    if let Some(saved) = saved.filter(|s| !s.is_empty()) {
        if buffer.restore(&saved) {
            info!("Restored draft from {}", config.draft_store_path.display());
            view.line(&format!(
                "Restored your previous draft ({} characters). Type :show to see it.",
                buffer.len()
            ));
        }
    }

    // --- 3. Initialize Service Adapters ---
    let http = reqwest::Client::builder()
        .connect_timeout(config.request_timeout)
        .build()?;
    let prediction = Arc::new(HttpPredictionAdapter::new(http, &config.predict_url)?);
    info!("Prediction endpoint: {}", prediction.endpoint());

    // --- 4. Wire the Controller ---
    let notifications = NotificationCenter::new();
    let toasts = spawn_toast_printer(&notifications, view.clone());
    let controller = Arc::new(
        AnalysisController::new(buffer, prediction, view.clone(), Arc::new(notifications))
            .with_request_timeout(Some(config.request_timeout)),
    );

    // --- 5. Run the Session ---
    view.line(HELP);
    run_session(controller, view, BufReader::new(tokio::io::stdin())).await?;
    // Give the printer a moment to show the last toasts.
    tokio::time::sleep(Duration::from_millis(100)).await;
    toasts.abort();

    Ok(())
}
