use admin_core::config::ApiConfig;
use admin_core::{AdminContext, AdminError, AdminSession, Result};
use reqwest::{Method, RequestBuilder};
use std::time::Duration;

use crate::auth;

/// HTTP adapter for the platform API. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: AdminSession,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: AdminSession) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdminError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AdminError::Config("API base URL is empty".to_string()));
        }

        tracing::info!("API client targeting {}", base_url);

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn from_context(ctx: &AdminContext) -> Result<Self> {
        Self::new(&ctx.config.api, ctx.session.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start an authorized request; fails before any I/O when no token is set.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        tracing::debug!("{} {}", method, path);
        let builder = self.http.request(method, self.url(path));
        auth::authorize(builder, &self.session)
    }

    /// Send and return the body of a successful response.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("API returned error status {}: {}", status, body);
            return Err(AdminError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
