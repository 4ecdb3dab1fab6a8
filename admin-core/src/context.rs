use std::sync::Arc;
use crate::config::Config;
use crate::session::AdminSession;
use crate::toast::{ToastDispatcher, ToastReceiver};

/// Application state shared by every view: configuration, the admin session,
/// and the toast outlet.
#[derive(Clone)]
pub struct AdminContext {
    pub config: Arc<Config>,
    pub session: AdminSession,
    pub toasts: ToastDispatcher,
}

impl AdminContext {
    pub fn new(config: Config) -> (Self, ToastReceiver) {
        let token = config.auth.resolve_token();
        if token.is_none() {
            tracing::warn!("No admin token configured; requests will be rejected locally");
        }

        let session = AdminSession::new(token);
        let (toasts, rx) = ToastDispatcher::channel();

        let ctx = AdminContext {
            config: Arc::new(config),
            session,
            toasts,
        };
        (ctx, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_with_resolved_token() {
        let config = Config::for_base_url("http://localhost:1", Some("abc".to_string()));
        let (ctx, _rx) = AdminContext::new(config);
        assert_eq!(ctx.session.token().as_deref(), Some("abc"));
    }
}
