use admin_api::ApiClient;
use admin_core::{Result, ToastDispatcher, User};

/// User picker for targeted notifications.
#[derive(Debug, Clone, Default)]
pub struct RecipientPicker {
    users: Vec<User>,
    search: String,
    selected: Vec<i64>,
}

impl RecipientPicker {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// Replace the candidate list from the server. Prior state is kept on failure.
    pub async fn load(&mut self, client: &ApiClient, toasts: &ToastDispatcher) -> Result<()> {
        match client.list_users().await {
            Ok(users) => {
                let known: Vec<i64> = users.iter().map(|u| u.id).collect();
                self.selected.retain(|id| known.contains(id));
                self.users = users;
                Ok(())
            }
            Err(e) => {
                toasts.report("Load users", &e);
                Err(e)
            }
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Candidates whose name, email, or username contains the search text.
    pub fn visible(&self) -> Vec<&User> {
        let needle = self.search.trim().to_lowercase();
        self.users
            .iter()
            .filter(|user| {
                needle.is_empty()
                    || user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
                    || user.username.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn toggle(&mut self, user_id: i64) -> bool {
        if let Some(pos) = self.selected.iter().position(|id| *id == user_id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(user_id);
            true
        }
    }

    /// Select every visible candidate, or deselect them when all already are.
    pub fn toggle_all_visible(&mut self) {
        let visible: Vec<i64> = self.visible().iter().map(|u| u.id).collect();
        if !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id)) {
            self.selected.retain(|id| !visible.contains(id));
        } else {
            for id in visible {
                if !self.selected.contains(&id) {
                    self.selected.push(id);
                }
            }
        }
    }

    pub fn is_selected(&self, user_id: i64) -> bool {
        self.selected.contains(&user_id)
    }

    pub fn selected_ids(&self) -> &[i64] {
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.search.clear();
    }
}
