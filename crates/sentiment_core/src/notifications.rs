//! crates/sentiment_core/src/notifications.rs
//!
//! The toast queue. Notifications are shown immediately, stack in arrival order,
//! and remove themselves once their display window and exit transition elapse.

use crate::domain::{Notification, NotificationKind, NotificationPhase};
use crate::lock;
use crate::ports::NotificationSink;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

/// How long a notification stays fully visible.
pub const DISPLAY_WINDOW: Duration = Duration::from_millis(4000);

/// Length of the exit transition that precedes removal.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

const EVENT_CAPACITY: usize = 64;

/// Lifecycle changes published to subscribers (renderers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(Notification),
    Leaving(Uuid),
    Removed(Uuid),
}

#[derive(Clone)]
pub struct NotificationCenter {
    active: Arc<Mutex<Vec<Notification>>>,
    events: broadcast::Sender<NotificationEvent>,
    display_window: Duration,
    exit_transition: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_timing(DISPLAY_WINDOW, EXIT_TRANSITION)
    }

    pub fn with_timing(display_window: Duration, exit_transition: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            active: Arc::new(Mutex::new(Vec::new())),
            events,
            display_window,
            exit_transition,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the notifications currently on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        lock(&self.active).clone()
    }

    /// Shows a notification and arms its expiry. Outside a runtime no expiry can
    /// be armed, so subscribers still see it but it never joins the active list.
    pub fn push(&self, text: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification::new(text, kind);
        let handle = tokio::runtime::Handle::try_current();
        if handle.is_ok() {
            lock(&self.active).push(notification.clone());
        }
        // No subscribers is fine.
        let _ = self.events.send(NotificationEvent::Shown(notification.clone()));
        debug!("Notification shown: {:?} {:?}", notification.kind, notification.text);

        match handle {
            Ok(handle) => {
                handle.spawn(self.clone().expire(notification.id));
            }
            Err(_) => warn!("No async runtime available, notification not kept as active."),
        }
        notification
    }

    async fn expire(self, id: Uuid) {
        tokio::time::sleep(self.display_window).await;
        {
            let mut active = lock(&self.active);
            if let Some(n) = active.iter_mut().find(|n| n.id == id) {
                n.phase = NotificationPhase::Leaving;
            }
        }
        let _ = self.events.send(NotificationEvent::Leaving(id));

        tokio::time::sleep(self.exit_transition).await;
        lock(&self.active).retain(|n| n.id != id);
        let _ = self.events.send(NotificationEvent::Removed(id));
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, text: &str, kind: NotificationKind) {
        self.push(text, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(center: &NotificationCenter) -> Vec<String> {
        center.active().into_iter().map(|n| n.text).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_stack_in_arrival_order() {
        let center = NotificationCenter::new();
        center.notify("first", NotificationKind::Success);
        center.notify("second", NotificationKind::Error);
        center.notify("first", NotificationKind::Success);

        assert_eq!(texts(&center), vec!["first", "second", "first"]);
        assert!(center
            .active()
            .iter()
            .all(|n| n.phase == NotificationPhase::Visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_leaves_then_is_removed() {
        let center = NotificationCenter::new();
        center.notify("done", NotificationKind::Success);

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert_eq!(center.active()[0].phase, NotificationPhase::Visible);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(center.active()[0].phase, NotificationPhase::Leaving);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_notification_expires_on_its_own_clock() {
        let center = NotificationCenter::new();
        center.notify("early", NotificationKind::Success);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        center.notify("late", NotificationKind::Error);

        tokio::time::sleep(Duration::from_millis(2400)).await;
        assert_eq!(texts(&center), vec!["late"]);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_the_full_lifecycle() {
        let center = NotificationCenter::new();
        let mut events = center.subscribe();
        let shown = center.push("hello", NotificationKind::Success);

        assert_eq!(events.recv().await.unwrap(), NotificationEvent::Shown(shown.clone()));
        assert_eq!(events.recv().await.unwrap(), NotificationEvent::Leaving(shown.id));
        assert_eq!(events.recv().await.unwrap(), NotificationEvent::Removed(shown.id));
    }

    #[test]
    fn test_without_a_runtime_nothing_lingers_as_active() {
        let center = NotificationCenter::new();
        let mut events = center.subscribe();

        let shown = center.push("cleared", NotificationKind::Success);

        assert!(center.active().is_empty());
        assert_eq!(events.try_recv().unwrap(), NotificationEvent::Shown(shown));
    }
}
