use std::fmt;
use tokio::sync::mpsc;

use crate::error::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Loading,
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToastLevel::Loading => "…",
            ToastLevel::Success => "ok",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warn",
            ToastLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

pub type ToastReceiver = mpsc::UnboundedReceiver<Toast>;

/// Single outlet for every operator-visible outcome.
#[derive(Debug, Clone)]
pub struct ToastDispatcher {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ToastDispatcher {
    pub fn channel() -> (Self, ToastReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn loading(&self, message: impl Into<String>) {
        self.dispatch(ToastLevel::Loading, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.dispatch(ToastLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.dispatch(ToastLevel::Info, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.dispatch(ToastLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.dispatch(ToastLevel::Error, message.into());
    }

    /// Report a failed action, prefixed with what was being attempted.
    pub fn report(&self, action: &str, err: &AdminError) {
        tracing::error!("{} failed: {}", action, err);
        let message = match err {
            AdminError::MissingToken => "Authentication token not found. Please log in again.".to_string(),
            e if e.is_unauthorized() => format!("{}: not authorized. Please log in again.", action),
            _ => format!("{}: {}", action, err),
        };
        self.dispatch(ToastLevel::Error, message);
    }

    fn dispatch(&self, level: ToastLevel, message: String) {
        if self.tx.send(Toast { level, message }).is_err() {
            tracing::debug!("Toast receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_arrive_in_order() {
        let (toasts, mut rx) = ToastDispatcher::channel();
        toasts.loading("Sending");
        toasts.success("Sent");

        assert_eq!(rx.try_recv().unwrap().level, ToastLevel::Loading);
        let done = rx.try_recv().unwrap();
        assert_eq!(done.level, ToastLevel::Success);
        assert_eq!(done.message, "Sent");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_token_has_login_hint() {
        let (toasts, mut rx) = ToastDispatcher::channel();
        toasts.report("Delete notification", &AdminError::MissingToken);

        let toast = rx.try_recv().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.contains("log in"));
    }

    #[test]
    fn rejected_credentials_have_login_hint() {
        let (toasts, mut rx) = ToastDispatcher::channel();
        toasts.report(
            "Load notifications",
            &AdminError::Http { status: 401, body: "{\"detail\":\"expired\"}".to_string() },
        );
        toasts.report("Load notifications", &AdminError::Http { status: 500, body: "boom".to_string() });

        let rejected = rx.try_recv().unwrap();
        assert_eq!(rejected.message, "Load notifications: not authorized. Please log in again.");
        let failed = rx.try_recv().unwrap();
        assert_eq!(failed.message, "Load notifications: Server returned 500: boom");
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (toasts, rx) = ToastDispatcher::channel();
        drop(rx);
        toasts.info("nobody listens");
    }
}
