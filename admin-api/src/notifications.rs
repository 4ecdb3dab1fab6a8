use admin_core::{
    DispatchReceipt, DispatchRequest, NotificationPage, NotificationQuery, RemoteId, Result,
};
use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;

pub const UNIFIED_PATH: &str = "/api/notifications/admin-notifications/unified/";
pub const SEND_IMMEDIATE_PATH: &str = "/api/notifications/admin/send-immediate/";
pub const SCHEDULE_PATH: &str = "/api/notifications/admin/schedule/";
pub const BULK_DELETE_PATH: &str = "/api/notifications/bulk-delete/";

pub fn cancel_path(id: &RemoteId) -> String {
    format!("/api/notifications/admin/scheduled/{}/cancel/", id)
}

pub fn delete_path(id: &RemoteId) -> String {
    format!("/api/notifications/delete/{}/", id)
}

#[derive(Debug, Serialize)]
struct BulkDeleteRequest<'a> {
    notification_ids: &'a [RemoteId],
}

impl ApiClient {
    pub async fn list_notifications(&self, query: &NotificationQuery) -> Result<NotificationPage> {
        let request = self.request(Method::GET, UNIFIED_PATH)?.query(query);
        let body = self.execute(request).await?;
        let page = NotificationPage::from_json(&body)?;

        tracing::debug!(
            "Loaded page {} with {} notifications (total {})",
            query.page,
            page.notifications.len(),
            page.total
        );
        Ok(page)
    }

    pub async fn send_immediate(&self, payload: &DispatchRequest) -> Result<DispatchReceipt> {
        self.dispatch(SEND_IMMEDIATE_PATH, payload).await
    }

    pub async fn schedule(&self, payload: &DispatchRequest) -> Result<DispatchReceipt> {
        self.dispatch(SCHEDULE_PATH, payload).await
    }

    async fn dispatch(&self, path: &str, payload: &DispatchRequest) -> Result<DispatchReceipt> {
        let request = self.request(Method::POST, path)?.json(payload);
        let body = self.execute(request).await?;
        Ok(DispatchReceipt::from_json(&body)?)
    }

    pub async fn cancel_scheduled(&self, id: &RemoteId) -> Result<()> {
        let request = self.request(Method::POST, &cancel_path(id))?;
        self.execute(request).await?;
        tracing::info!("Cancelled scheduled notification {}", id);
        Ok(())
    }

    pub async fn delete_notification(&self, id: &RemoteId) -> Result<()> {
        let request = self.request(Method::DELETE, &delete_path(id))?;
        self.execute(request).await?;
        tracing::info!("Deleted notification {}", id);
        Ok(())
    }

    pub async fn bulk_delete(&self, ids: &[RemoteId]) -> Result<()> {
        let request = self
            .request(Method::DELETE, BULK_DELETE_PATH)?
            .json(&BulkDeleteRequest { notification_ids: ids });
        self.execute(request).await?;
        tracing::info!("Bulk deleted {} notifications", ids.len());
        Ok(())
    }
}
