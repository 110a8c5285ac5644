//! Transient notifications.
//!
//! Anything holding a [`Notifier`] (the REST client, commands) can raise a toast from any thread.
//! The UI owns the [`ToastCenter`] state, pumps it once per frame and renders what is active.

use std::any::Any;
use std::time::{Duration, Instant};

use flume::{Receiver, Sender};
use log::{debug, warn};
use tabula_states::{State, state_assign_impl};

/// How long a toast stays on screen unless overridden.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Cloneable send side of the toast channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    send: Sender<Toast>,
}

impl Notifier {
    pub fn channel() -> (Self, Receiver<Toast>) {
        let (send, recv) = flume::unbounded();
        (Self { send }, recv)
    }

    pub fn notify(&self, toast: Toast) {
        debug!("toast ({:?}): {}", toast.level, toast.message);
        if self.send.send(toast).is_err() {
            warn!("Notifier: toast center dropped, toast discarded");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Toast::error(message));
    }
}

#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub toast: Toast,
    pub shown_at: Instant,
}

impl ActiveToast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.toast.duration
    }
}

/// Receive side of the toast channel plus the toasts currently on screen.
#[derive(Debug)]
pub struct ToastCenter {
    notifier: Notifier,
    recv: Receiver<Toast>,
    active: Vec<ActiveToast>,
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastCenter {
    pub fn new() -> Self {
        let (notifier, recv) = Notifier::channel();
        Self {
            notifier,
            recv,
            active: Vec::new(),
        }
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Move newly raised toasts on screen and drop expired ones.
    pub fn pump(&mut self, now: Instant) {
        self.active.extend(self.recv.try_iter().map(|toast| ActiveToast {
            toast,
            shown_at: now,
        }));
        self.active.retain(|active| !active.is_expired(now));
    }

    pub fn active(&self) -> &[ActiveToast] {
        &self.active
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.active.len() {
            self.active.remove(index);
        }
    }
}

impl State for ToastCenter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_collects_raised_toasts() {
        let mut center = ToastCenter::new();
        let notifier = center.notifier();
        notifier.success("User created successfully");
        notifier.error("Failed to create user");

        center.pump(Instant::now());

        let levels: Vec<_> = center.active().iter().map(|a| a.toast.level).collect();
        assert_eq!(levels, vec![ToastLevel::Success, ToastLevel::Error]);
    }

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut center = ToastCenter::new();
        center
            .notifier()
            .notify(Toast::info("short").with_duration(Duration::from_millis(10)));
        center.notifier().notify(Toast::info("default"));

        let start = Instant::now();
        center.pump(start);
        assert_eq!(center.active().len(), 2);

        center.pump(start + Duration::from_millis(20));
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.active()[0].toast.duration, DEFAULT_TOAST_DURATION);

        center.pump(start + DEFAULT_TOAST_DURATION);
        assert!(center.active().is_empty());
    }

    #[test]
    fn dismiss_ignores_out_of_range_index() {
        let mut center = ToastCenter::new();
        center.notifier().error("boom");
        center.pump(Instant::now());

        center.dismiss(3);
        assert_eq!(center.active().len(), 1);
        center.dismiss(0);
        assert!(center.active().is_empty());
    }
}
