use std::collections::VecDeque;
use std::time::Instant;

use promptdeck_core::{Notification, Notifier};

/// At most this many toasts are kept on screen.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

impl Toast {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.notification.duration
    }
}

/// Notifier that keeps recent notifications around for the renderer.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            shown_at: now,
        });
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        self.toasts.len() != before
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_prune_removes_expired() {
        let mut queue = ToastQueue::new();
        let now = Instant::now();
        queue.push_at(Notification::success("Added to favorites"), now);

        assert!(!queue.prune(now + Duration::from_millis(1999)));
        assert!(queue.prune(now + Duration::from_millis(2000)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_oldest_toast_is_dropped_when_full() {
        let mut queue = ToastQueue::new();
        let now = Instant::now();
        for i in 0..5 {
            queue.push_at(Notification::success(format!("toast {i}")), now);
        }

        let messages: Vec<&str> = queue.visible().map(|t| t.notification.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }
}
