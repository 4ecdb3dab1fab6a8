use admin_core::{AdminError, AdminSession};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Build the Authorization header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token.trim())
}

/// Attach the session token to an outgoing request.
///
/// Fails with `MissingToken` when the session is empty so no unauthenticated
/// request leaves the process.
pub fn authorize(builder: RequestBuilder, session: &AdminSession) -> Result<RequestBuilder, AdminError> {
    let token = session
        .token()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            tracing::debug!("Missing admin token");
            AdminError::MissingToken
        })?;

    Ok(builder.header(AUTHORIZATION, bearer(&token)))
}
