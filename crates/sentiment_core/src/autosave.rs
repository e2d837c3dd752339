//! crates/sentiment_core/src/autosave.rs
//!
//! Debounced persistence of the draft into an injected `KeyValueStore`.
//! Every `schedule` call cancels the save that is still waiting, so only the
//! content present after a full quiet period is written.

use crate::lock;
use crate::ports::KeyValueStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// The key the draft is stored under.
pub const DRAFT_KEY: &str = "sentimentAnalysisText";

/// Input inactivity required before the draft is written.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Default)]
struct AutosaveState {
    generation: u64,
    pending: Option<String>,
    token: Option<CancellationToken>,
}

/// Writes the draft after a period of inactivity.
#[derive(Clone)]
pub struct DraftAutosaver {
    store: Arc<dyn KeyValueStore>,
    delay: Duration,
    state: Arc<Mutex<AutosaveState>>,
}

impl DraftAutosaver {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_delay(store, AUTOSAVE_DELAY)
    }

    pub fn with_delay(store: Arc<dyn KeyValueStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            state: Arc::new(Mutex::new(AutosaveState::default())),
        }
    }

    /// Reads the draft saved by a previous session, if any.
    pub fn load(&self) -> Option<String> {
        match self.store.get(DRAFT_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Failed to read saved draft: {}", e);
                None
            }
        }
    }

    /// Replaces any pending save with `content`, written after the quiet period.
    pub fn schedule(&self, content: &str) {
        let token = CancellationToken::new();
        let generation = {
            let mut state = lock(&self.state);
            if let Some(previous) = state.token.replace(token.clone()) {
                previous.cancel();
            }
            state.generation += 1;
            state.pending = Some(content.to_string());
            state.generation
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                // Left pending; `flush` still writes it.
                warn!("No async runtime available, draft autosave deferred.");
                return;
            }
        };

        let store = self.store.clone();
        let state = self.state.clone();
        let delay = self.delay;
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let content = {
                        let mut state = lock(&state);
                        if state.generation != generation {
                            return;
                        }
                        state.token = None;
                        state.pending.take()
                    };
                    if let Some(content) = content {
                        // Stores may block on disk I/O.
                        let write = tokio::task::spawn_blocking(move || {
                            write_draft(store.as_ref(), &content)
                        });
                        if let Err(e) = write.await {
                            warn!("Draft save task failed: {}", e);
                        }
                    }
                }
            }
        });
    }

    /// Writes the pending draft right away. Used on shutdown.
    pub fn flush(&self) {
        let content = {
            let mut state = lock(&self.state);
            if let Some(token) = state.token.take() {
                token.cancel();
            }
            state.pending.take()
        };
        if let Some(content) = content {
            write_draft(self.store.as_ref(), &content);
        }
    }
}

fn write_draft(store: &dyn KeyValueStore, content: &str) {
    match store.set(DRAFT_KEY, content) {
        Ok(()) => debug!("Draft saved ({} chars).", content.chars().count()),
        Err(e) => warn!("Failed to save draft: {}", e),
    }
}
