//! Transient toasts shown over the thread.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    created_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
}

impl Notifications {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Info, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Error, message.into(), Instant::now());
    }

    fn push_at(&mut self, kind: NotificationKind, message: String, created_at: Instant) {
        self.items.push_back(Notification {
            kind,
            message,
            created_at,
        });
        while self.items.len() > MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    /// Drop expired entries. Returns `true` when anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
        before != self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
