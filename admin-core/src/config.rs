use serde::{Deserialize, Serialize};
use std::env;

use crate::session::token_from_cookie_header;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub cookie: Option<String>, // Raw Cookie header, the `adminToken` entry is used
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Refetch the current page after bulk deletes and cancellations
    pub reconcile_after_mutation: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        Config {
            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
                timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
            auth: AuthConfig {
                token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.trim().is_empty()),
                cookie: env::var("ADMIN_COOKIE").ok(),
            },
            board: BoardConfig {
                reconcile_after_mutation: env::var("RECONCILE_AFTER_MUTATION")
                    .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(false),
            },
        }
    }

    /// Configuration pointing at `base_url` with an explicit token and defaults elsewhere.
    pub fn for_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Config {
            api: ApiConfig {
                base_url: base_url.into(),
                timeout_secs: 30,
            },
            auth: AuthConfig {
                token,
                cookie: None,
            },
            board: BoardConfig {
                reconcile_after_mutation: false,
            },
        }
    }
}

impl AuthConfig {
    /// The explicit token wins over the cookie jar entry.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| self.cookie.as_deref().and_then(token_from_cookie_header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_takes_precedence() {
        let auth = AuthConfig {
            token: Some("explicit".to_string()),
            cookie: Some("adminToken=from-cookie".to_string()),
        };
        assert_eq!(auth.resolve_token().as_deref(), Some("explicit"));
    }

    #[test]
    fn falls_back_to_cookie() {
        let auth = AuthConfig {
            token: None,
            cookie: Some("theme=dark; adminToken=from-cookie".to_string()),
        };
        assert_eq!(auth.resolve_token().as_deref(), Some("from-cookie"));
    }

    #[test]
    fn no_token_anywhere() {
        let auth = AuthConfig {
            token: None,
            cookie: Some("theme=dark".to_string()),
        };
        assert_eq!(auth.resolve_token(), None);
    }
}
