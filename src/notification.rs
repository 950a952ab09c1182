//! Transient toast notifications.
//!
//! At most one notification is live at a time. Showing a new one removes the
//! current one immediately, with no overlap. A notification leaves either when
//! its deadline passes or when the user closes it, whichever comes first; the
//! loser of that race finds a stale id and does nothing.

use crate::config::NOTIFICATION_DURATION_MS;
use crate::now_ms;
use log::debug;

/// Severity of a notification, which decides its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification-success",
            NotificationKind::Error => "notification notification-error",
            NotificationKind::Info => "notification notification-info",
        }
    }
}

/// Lifecycle of the displayed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Sliding in or resting on screen.
    Shown,
    /// Sliding out; detached once the animation ends.
    Leaving,
}

impl NotificationPhase {
    pub fn animation_class(&self) -> &'static str {
        match self {
            NotificationPhase::Shown => "slide-in-right",
            NotificationPhase::Leaving => "slide-out-right",
        }
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: f64,
    pub deadline: f64,
    pub phase: NotificationPhase,
}

/// Anything that can surface a message to the user.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

/// Holds the single live notification.
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: NotificationId,
    clock: fn() -> f64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_clock(now_ms)
    }
}

impl NotificationCenter {
    pub fn with_clock(clock: fn() -> f64) -> Self {
        Self {
            current: None,
            next_id: 0,
            clock,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replace whatever is on screen with a new notification.
    pub fn show(&mut self, message: &str, kind: NotificationKind) -> NotificationId {
        if let Some(old) = self.current.take() {
            debug!("notification {} superseded", old.id);
        }
        self.next_id += 1;
        let created_at = (self.clock)();
        self.current = Some(Notification {
            id: self.next_id,
            message: message.to_string(),
            kind,
            created_at,
            deadline: created_at + f64::from(NOTIFICATION_DURATION_MS),
            phase: NotificationPhase::Shown,
        });
        self.next_id
    }

    /// User pressed close. Returns `true` if the notification started leaving.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.start_leaving(id)
    }

    /// Auto-dismiss timer fired. Ignored unless `id` is still shown.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        self.start_leaving(id)
    }

    /// Exit animation finished; drop the element if it is still ours.
    pub fn detach(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(n) if n.id == id && n.phase == NotificationPhase::Leaving => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    fn start_leaving(&mut self, id: NotificationId) -> bool {
        match self.current.as_mut() {
            Some(n) if n.id == id && n.phase == NotificationPhase::Shown => {
                n.phase = NotificationPhase::Leaving;
                true
            }
            _ => false,
        }
    }
}

impl Notifier for NotificationCenter {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.show(message, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static NOW: Cell<f64> = const { Cell::new(1_000.0) };
    }

    fn fake_clock() -> f64 {
        NOW.with(Cell::get)
    }

    fn advance(ms: f64) {
        NOW.with(|n| n.set(n.get() + ms));
    }

    #[test]
    fn newest_notification_replaces_current() {
        let mut center = NotificationCenter::with_clock(fake_clock);
        center.show("A", NotificationKind::Success);
        center.show("B", NotificationKind::Error);

        let current = center.current().unwrap();
        assert_eq!(current.message, "B");
        assert_eq!(current.kind, NotificationKind::Error);
        assert_eq!(current.kind.class(), "notification notification-error");
    }

    #[test]
    fn deadline_is_creation_plus_duration() {
        let mut center = NotificationCenter::with_clock(fake_clock);
        center.show("hi", NotificationKind::Info);
        let n = center.current().unwrap();
        assert_eq!(n.deadline - n.created_at, 5_000.0);
    }

    #[test]
    fn expire_then_detach_removes_notification() {
        let mut center = NotificationCenter::with_clock(fake_clock);
        let id = center.show("hi", NotificationKind::Info);
        advance(5_000.0);
        assert!(center.expire(id));
        assert_eq!(center.current().unwrap().phase, NotificationPhase::Leaving);
        assert!(center.detach(id));
        assert!(center.current().is_none());
    }

    #[test]
    fn manual_dismiss_wins_over_timer() {
        let mut center = NotificationCenter::with_clock(fake_clock);
        let id = center.show("hi", NotificationKind::Success);
        assert!(center.dismiss(id));
        advance(5_000.0);
        assert!(!center.expire(id));
        assert!(!center.dismiss(id));
        assert!(center.detach(id));
        assert!(!center.detach(id));
    }

    #[test]
    fn stale_ids_do_not_touch_the_replacement() {
        let mut center = NotificationCenter::with_clock(fake_clock);
        let first = center.show("A", NotificationKind::Success);
        let second = center.show("B", NotificationKind::Info);
        advance(10_000.0);

        assert!(!center.expire(first));
        assert!(!center.dismiss(first));
        assert!(!center.detach(first));
        let current = center.current().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.phase, NotificationPhase::Shown);
    }
}
