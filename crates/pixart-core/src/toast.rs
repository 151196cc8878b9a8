//! Save acknowledgment ("toast") debouncing
//!
//! Every save restarts the debounce window, so a burst of saves shows the
//! toast once. The toast then stays visible for a fixed time. Time is passed
//! in explicitly so hosts drive it from their own event loop.

use std::time::{Duration, Instant};

/// Quiet time required after the last save before the toast appears
pub const TOAST_DEBOUNCE: Duration = Duration::from_millis(500);

/// How long the toast stays visible
pub const TOAST_VISIBLE: Duration = Duration::from_millis(2000);

/// Toast visibility transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    /// Toast became (or stays) visible; hide timer restarted
    Shown,
    /// Toast hidden
    Hidden,
}

/// Debounced toast state machine
#[derive(Debug, Clone)]
pub struct ToastDebouncer {
    debounce: Duration,
    visible_for: Duration,
    show_at: Option<Instant>,
    hide_at: Option<Instant>,
}

impl Default for ToastDebouncer {
    fn default() -> Self {
        Self::new(TOAST_DEBOUNCE, TOAST_VISIBLE)
    }
}

impl ToastDebouncer {
    /// Create a debouncer with custom timings
    pub fn new(debounce: Duration, visible_for: Duration) -> Self {
        Self {
            debounce,
            visible_for,
            show_at: None,
            hide_at: None,
        }
    }

    /// Record a save at `now`
    pub fn notify_save(&mut self, now: Instant) {
        self.show_at = Some(now + self.debounce);
    }

    /// Whether the toast is currently visible
    pub fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Advance to `now`, returning the next due transition.
    ///
    /// Call repeatedly until it returns `None` to catch up after a long gap.
    pub fn poll(&mut self, now: Instant) -> Option<ToastEvent> {
        if let Some(show_at) = self.show_at {
            if now >= show_at {
                self.show_at = None;
                self.hide_at = Some(show_at + self.visible_for);
                return Some(ToastEvent::Shown);
            }
        }

        if let Some(hide_at) = self.hide_at {
            if now >= hide_at {
                self.hide_at = None;
                return Some(ToastEvent::Hidden);
            }
        }

        None
    }
}
