use std::sync::Arc;
use tokio::sync::watch;

const TOKEN_COOKIE: &str = "adminToken";

/// Shared holder for the admin bearer token.
///
/// Every request reads the token at send time, so replacing it here is seen by
/// all clients built from the same session.
#[derive(Clone, Debug)]
pub struct AdminSession {
    token: Arc<watch::Sender<Option<String>>>,
}

impl AdminSession {
    pub fn new(token: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(token);
        Self { token: Arc::new(tx) }
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.token.send_replace(Some(token.into()));
        tracing::debug!("Admin token replaced");
    }

    pub fn clear(&self) {
        self.token.send_replace(None);
        tracing::debug!("Admin token cleared");
    }
}

/// Pull the `adminToken` value out of a `Cookie` header string.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
