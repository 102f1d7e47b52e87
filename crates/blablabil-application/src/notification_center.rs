//! Transient toast queue shared across the app.
//!
//! # Responsibilities
//! - Hold the ordered list of live notifications
//! - Auto-dismiss timed notifications after their display duration
//! - Hand out snapshots for rendering
//!
//! # Does NOT
//! - Persist anything (notifications die with the process)
//! - Decide wording (callers pass finished messages)

use std::sync::Arc;
use std::time::Duration;

use blablabil_core::notification::{Notification, NotificationId, Severity};
use tokio::sync::RwLock;

/// Display time applied when a caller does not pick one.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// In-memory notification queue. Cloning shares the same queue.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    entries: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification and returns its id.
    ///
    /// A non-zero `duration` schedules auto-dismissal; `None` or a zero
    /// duration keeps the notification up until dismissed explicitly.
    pub async fn notify(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> NotificationId {
        let notification = Notification::new(message, severity, duration);
        let id = notification.id;
        tracing::debug!(
            "[NotificationCenter] Queued {} notification {}",
            severity.as_str(),
            id
        );

        self.entries.write().await.push(notification);

        if let Some(duration) = duration {
            if !duration.is_zero() {
                let center = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    // Dismissal is idempotent, so a manual dismiss in the
                    // meantime makes this a no-op.
                    center.dismiss(id).await;
                });
            }
        }

        id
    }

    pub async fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Success, Some(DEFAULT_DURATION))
            .await
    }

    pub async fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Error, Some(DEFAULT_DURATION))
            .await
    }

    pub async fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Warning, Some(DEFAULT_DURATION))
            .await
    }

    pub async fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Info, Some(DEFAULT_DURATION))
            .await
    }

    /// Removes a notification. Unknown or already-removed ids are a no-op.
    pub async fn dismiss(&self, id: NotificationId) {
        self.entries.write().await.retain(|n| n.id != id);
    }

    /// Drops every live notification.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Returns the live notifications in the order they were queued.
    pub async fn snapshot(&self) -> Vec<Notification> {
        self.entries.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notifications_keep_queue_order() {
        let center = NotificationCenter::new();
        let first = center.notify("one", Severity::Info, None).await;
        let second = center.notify("two", Severity::Error, None).await;

        let live = center.snapshot().await;
        assert_eq!(live.len(), 2);
        assert_eq!(live[0].id, first);
        assert_eq!(live[1].id, second);
        assert_eq!(live[1].severity, Severity::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_notification_expires() {
        let center = NotificationCenter::new();
        center
            .notify("saved", Severity::Success, Some(Duration::from_secs(5)))
            .await;

        tokio::time::sleep(Duration::from_millis(4_999)).await;
        assert_eq!(center.snapshot().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(center.snapshot().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn untimed_notification_stays() {
        let center = NotificationCenter::new();
        center.notify("sticky", Severity::Warning, None).await;
        center
            .notify("also sticky", Severity::Warning, Some(Duration::ZERO))
            .await;

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(center.snapshot().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_dismiss_beats_the_timer() {
        let center = NotificationCenter::new();
        let id = center
            .notify("going", Severity::Info, Some(Duration::from_secs(5)))
            .await;

        center.dismiss(id).await;
        assert!(center.snapshot().await.is_empty());

        // The expiry timer still fires; it must not disturb anything else.
        let survivor = center.notify("staying", Severity::Info, None).await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        let live = center.snapshot().await;
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, survivor);
    }

    #[tokio::test]
    async fn dismiss_is_idempotent() {
        let center = NotificationCenter::new();
        let id = center.notify("once", Severity::Info, None).await;

        center.dismiss(id).await;
        center.dismiss(id).await;
        center.dismiss(NotificationId::new()).await;

        assert!(center.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_queue() {
        let center = NotificationCenter::new();
        center.notify("a", Severity::Info, None).await;
        center.notify("b", Severity::Info, None).await;

        center.clear().await;
        assert!(center.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn convenience_wrappers_set_severity_and_duration() {
        let center = NotificationCenter::new();
        center.success("ok").await;
        center.error("bad").await;

        let live = center.snapshot().await;
        assert_eq!(live[0].severity, Severity::Success);
        assert_eq!(live[1].severity, Severity::Error);
        assert_eq!(live[0].duration, Some(DEFAULT_DURATION));
        assert_eq!(live[1].duration, Some(DEFAULT_DURATION));
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let center = NotificationCenter::new();
        let other = center.clone();
        center.notify("shared", Severity::Info, None).await;

        assert_eq!(other.snapshot().await.len(), 1);
    }
}
