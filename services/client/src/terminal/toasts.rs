//! services/client/src/terminal/toasts.rs
//!
//! Prints notifications as they are shown. A terminal cannot take a line back,
//! so the exit transition and removal are only traced.

use crate::terminal::view::TerminalView;
use sentiment_core::notifications::{NotificationCenter, NotificationEvent};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Subscribes to `center` and prints every new notification through `view`.
pub fn spawn_toast_printer<W>(center: &NotificationCenter, view: Arc<TerminalView<W>>) -> JoinHandle<()>
where
    W: Write + Send + 'static,
{
    let mut events = center.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(NotificationEvent::Shown(notification)) => view.toast(&notification),
                Ok(NotificationEvent::Leaving(id)) => trace!("Notification {} leaving", id),
                Ok(NotificationEvent::Removed(id)) => trace!("Notification {} removed", id),
                Err(RecvError::Lagged(missed)) => {
                    warn!("Toast printer fell behind, {} notifications skipped.", missed)
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
