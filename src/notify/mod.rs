//! Transient user-visible notifications (toasts).

use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// A user-facing error toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    /// How long the toast stays up before it is dismissed automatically.
    pub duration: Duration,
    pub closable: bool,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration: DEFAULT_DURATION,
            closable: true,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The embedded editor could not be initialised.
    pub fn editor_error() -> Self {
        Self::new("Editor Error", "Failed to load the code editor")
    }

    /// A run failed; `message` is the underlying error's text.
    pub fn execution_error(message: impl Into<String>) -> Self {
        Self::new("Error executing code", message)
    }
}

#[derive(Debug)]
struct Posted {
    notification: Notification,
    posted_at: Instant,
}

/// Stack of active toasts, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
    active: Vec<Posted>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.active.push(Posted {
            notification,
            posted_at: now,
        });
    }

    /// Drop every toast whose duration has elapsed at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.active
            .retain(|p| now.saturating_duration_since(p.posted_at) < p.notification.duration);
    }

    /// Close the newest closable toast. Returns whether one was closed.
    pub fn dismiss(&mut self) -> bool {
        match self.active.iter().rposition(|p| p.notification.closable) {
            Some(idx) => {
                self.active.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|p| &p.notification)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_notifications() {
        let n = Notification::editor_error();
        assert_eq!(n.title, "Editor Error");
        assert_eq!(n.description, "Failed to load the code editor");
        assert_eq!(n.duration, Duration::from_secs(5));
        assert!(n.closable);

        let n = Notification::execution_error("connection refused");
        assert_eq!(n.title, "Error executing code");
        assert_eq!(n.description, "connection refused");
    }

    #[test]
    fn toasts_expire_after_their_duration() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push(Notification::editor_error(), start);
        toasts.push(
            Notification::execution_error("x").with_duration(Duration::from_secs(10)),
            start,
        );

        toasts.prune(start + Duration::from_secs(4));
        assert_eq!(toasts.len(), 2);
        toasts.prune(start + Duration::from_secs(5));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().description, "x");
        toasts.prune(start + Duration::from_secs(11));
        assert!(toasts.is_empty());
    }

    #[test]
    fn dismiss_closes_newest_closable() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push(Notification::execution_error("first"), now);
        let mut sticky = Notification::execution_error("sticky");
        sticky.closable = false;
        toasts.push(sticky, now);

        assert!(toasts.dismiss());
        let left: Vec<_> = toasts.iter().map(|n| n.description.as_str()).collect();
        assert_eq!(left, vec!["sticky"]);
        assert!(!toasts.dismiss());
    }
}
