use admin_api::ApiClient;
use admin_core::{
    AdminContext, Notification, NotificationPage, RemoteId, Result, ToastDispatcher,
    ValidationError,
};
use chrono::{DateTime, TimeZone};

use crate::filters::NotificationFilters;
use crate::grouping::{group_notifications, NotificationGroups};
use crate::selection::Selection;

/// Paged, filtered view of admin notifications with bulk actions.
///
/// Every operation takes `&mut self`, so one request is in flight at a time and
/// a slow response can never overwrite the result of a later one.
pub struct NotificationBoard {
    client: ApiClient,
    toasts: ToastDispatcher,
    reconcile_after_mutation: bool,
    notifications: Vec<Notification>,
    total_count: u64,
    has_next: bool,
    has_prev: bool,
    page: u32,
    filters: NotificationFilters,
    selection: Selection,
}

impl NotificationBoard {
    pub fn new(client: ApiClient, toasts: ToastDispatcher) -> Self {
        Self {
            client,
            toasts,
            reconcile_after_mutation: false,
            notifications: Vec::new(),
            total_count: 0,
            has_next: false,
            has_prev: false,
            page: 1,
            filters: NotificationFilters::default(),
            selection: Selection::default(),
        }
    }

    pub fn from_context(ctx: &AdminContext, client: ApiClient) -> Self {
        let mut board = Self::new(client, ctx.toasts.clone());
        board.reconcile_after_mutation = ctx.config.board.reconcile_after_mutation;
        board
    }

    /// Follow bulk deletes and cancellations with a refetch of the current page.
    pub fn with_reconcile(mut self, reconcile: bool) -> Self {
        self.reconcile_after_mutation = reconcile;
        self
    }

    /// Initial filters, applied by the first fetch.
    pub fn with_filters(mut self, filters: NotificationFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn filters(&self) -> &NotificationFilters {
        &self.filters
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn find(&self, id: &RemoteId) -> Option<&Notification> {
        self.notifications.iter().find(|n| &n.id == id)
    }

    pub fn groups<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> NotificationGroups<'_> {
        group_notifications(&self.notifications, now)
    }

    /// Load `page` with the current filters. On failure the previous page stays.
    pub async fn fetch_notifications(&mut self, page: u32) -> Result<()> {
        let query = self.filters.to_query(page);

        match self.client.list_notifications(&query).await {
            Ok(result) => {
                self.apply_page(query.page, result);
                Ok(())
            }
            Err(e) => {
                self.toasts.report("Load notifications", &e);
                Err(e)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.fetch_notifications(self.page).await
    }

    fn apply_page(&mut self, page: u32, result: NotificationPage) {
        self.notifications = result.notifications;
        self.total_count = result.total;
        self.has_next = result.has_next;
        self.has_prev = result.has_prev;
        self.page = page;
        self.selection
            .retain_visible(self.notifications.iter().map(|n| &n.id));
    }

    /// Apply new filters; a change resets to page 1 and refetches.
    pub async fn set_filters(&mut self, filters: NotificationFilters) -> Result<bool> {
        if filters == self.filters {
            return Ok(false);
        }
        self.filters = filters;
        self.fetch_notifications(1).await?;
        Ok(true)
    }

    pub async fn next_page(&mut self) -> Result<bool> {
        if !self.has_next {
            return Ok(false);
        }
        self.fetch_notifications(self.page + 1).await?;
        Ok(true)
    }

    pub async fn previous_page(&mut self) -> Result<bool> {
        if !self.has_prev || self.page <= 1 {
            return Ok(false);
        }
        self.fetch_notifications(self.page - 1).await?;
        Ok(true)
    }

    pub fn toggle_selection(&mut self, id: &RemoteId) -> bool {
        self.selection.toggle(id)
    }

    pub fn toggle_select_all(&mut self) {
        self.selection
            .toggle_all(self.notifications.iter().map(|n| &n.id));
    }

    pub fn is_selected(&self, id: &RemoteId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete one notification by its display id.
    pub async fn delete_notification(&mut self, id: &RemoteId) -> Result<()> {
        let remote = self.require(id)?.remote_id().clone();

        if let Err(e) = self.client.delete_notification(&remote).await {
            self.toasts.report("Delete notification", &e);
            return Err(e);
        }

        self.remove_local(std::slice::from_ref(id));
        self.toasts.success("Notification deleted");
        Ok(())
    }

    /// Delete every selected notification in one request.
    pub async fn bulk_delete(&mut self) -> Result<usize> {
        let (display_ids, remote_ids): (Vec<RemoteId>, Vec<RemoteId>) = self
            .notifications
            .iter()
            .filter(|n| self.selection.contains(&n.id))
            .map(|n| (n.id.clone(), n.remote_id().clone()))
            .unzip();

        if remote_ids.is_empty() {
            let err = ValidationError::EmptySelection;
            self.toasts.warning(err.to_string());
            return Err(err.into());
        }

        if let Err(e) = self.client.bulk_delete(&remote_ids).await {
            self.toasts.report("Delete notifications", &e);
            return Err(e);
        }

        let removed = self.remove_local(&display_ids);
        self.selection.clear();
        self.toasts
            .success(format!("{} notifications deleted", removed));

        self.reconcile().await;
        Ok(removed)
    }

    /// Cancel a pending notification by its display id.
    pub async fn cancel_scheduled(&mut self, id: &RemoteId) -> Result<()> {
        let target = self.require(id)?;
        if !target.is_scheduled() {
            let err = ValidationError::NotScheduled(id.to_string());
            self.toasts.warning(err.to_string());
            return Err(err.into());
        }
        let remote = target.remote_id().clone();

        if let Err(e) = self.client.cancel_scheduled(&remote).await {
            self.toasts.report("Cancel scheduled notification", &e);
            return Err(e);
        }

        self.remove_local(std::slice::from_ref(id));
        self.toasts.success("Scheduled notification cancelled");

        self.reconcile().await;
        Ok(())
    }

    fn require(&self, id: &RemoteId) -> Result<&Notification> {
        self.find(id)
            .ok_or_else(|| ValidationError::UnknownNotification(id.to_string()).into())
    }

    /// Remove items by display id and shrink the total; returns how many were removed.
    fn remove_local(&mut self, ids: &[RemoteId]) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| !ids.contains(&n.id));
        let removed = before - self.notifications.len();

        for id in ids {
            self.selection.remove(id);
        }
        self.total_count = self.total_count.saturating_sub(removed as u64);
        removed
    }

    /// Refetch the current page after a mutation. The mutation already
    /// succeeded, so a failed refetch is only logged.
    async fn reconcile(&mut self) {
        if !self.reconcile_after_mutation {
            return;
        }
        let query = self.filters.to_query(self.page);
        match self.client.list_notifications(&query).await {
            Ok(result) => self.apply_page(query.page, result),
            Err(e) => tracing::warn!("Refetch after mutation failed: {}", e),
        }
    }
}

impl std::fmt::Debug for NotificationBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBoard")
            .field("page", &self.page)
            .field("total_count", &self.total_count)
            .field("visible", &self.notifications.len())
            .field("selected", &self.selection.len())
            .field("filters", &self.filters)
            .finish()
    }
}
