use admin_core::{Result, User};
use reqwest::Method;

use crate::client::ApiClient;

pub const USERS_PATH: &str = "/api/dashboard/users/";

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let request = self.request(Method::GET, USERS_PATH)?;
        let body = self.execute(request).await?;
        let users = User::list_from_json(&body)?;
        tracing::debug!("Loaded {} recipient candidates", users.len());
        Ok(users)
    }
}
