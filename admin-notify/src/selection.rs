use admin_core::RemoteId;

/// Display ids checked for a bulk action, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<RemoteId>,
}

impl Selection {
    pub fn contains(&self, id: &RemoteId) -> bool {
        self.ids.contains(id)
    }

    /// Check an unchecked id or uncheck a checked one. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &RemoteId) -> bool {
        if self.contains(id) {
            self.ids.retain(|i| i != id);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    /// Select every visible id, or clear when all of them are already selected.
    pub fn toggle_all<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a RemoteId>,
    {
        let visible: Vec<RemoteId> = visible.into_iter().cloned().collect();
        let all_selected = !visible.is_empty() && visible.iter().all(|id| self.contains(id));

        if all_selected {
            self.ids.clear();
        } else {
            self.ids = visible;
        }
    }

    /// Drop ids that are no longer visible.
    pub fn retain_visible<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a RemoteId>,
    {
        let visible: Vec<&RemoteId> = visible.into_iter().collect();
        self.ids.retain(|id| visible.contains(&id));
    }

    pub fn remove(&mut self, id: &RemoteId) {
        self.ids.retain(|i| i != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<RemoteId> {
        values.iter().copied().map(RemoteId::Number).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::default();
        let id = RemoteId::Number(1);

        assert!(selection.toggle(&id));
        assert!(selection.contains(&id));
        assert!(!selection.toggle(&id));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_selects_everything_then_nothing() {
        let visible = ids(&[1, 2, 3]);
        let mut selection = Selection::default();
        selection.toggle(&visible[1]);

        selection.toggle_all(&visible);
        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), visible);

        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_on_empty_page_stays_empty() {
        let mut selection = Selection::default();
        selection.toggle_all(&Vec::new());
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_replaces_stale_ids() {
        let mut selection = Selection::default();
        selection.toggle(&RemoteId::Number(99));

        let visible = ids(&[1, 2]);
        selection.toggle_all(&visible);
        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), visible);
    }

    #[test]
    fn retain_visible_drops_missing() {
        let mut selection = Selection::default();
        for id in ids(&[1, 2, 3]) {
            selection.toggle(&id);
        }
        selection.retain_visible(&ids(&[2, 3, 4]));
        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), ids(&[2, 3]));
    }
}
