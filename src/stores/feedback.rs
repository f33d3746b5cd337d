use tracing::debug;

use crate::api::feedback::list_feedback;
use crate::api::ApiClient;
use crate::error::{AdminResult, FALLBACK_ERROR_MESSAGE};
use crate::models::{Feedback, FeedbackStatus};

pub const DEFAULT_FEEDBACK_PAGE_SIZE: u32 = 20;

/// Feedback inbox. Unlike the changelog this collection is unbounded, so
/// paging and status filtering happen on the server.
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    items: Vec<Feedback>,
    total: u64,
    page: u32,
    page_size: u32,
    status_filter: Option<FeedbackStatus>,
    loading: bool,
    error: Option<String>,
}

impl Default for FeedbackStore {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_PAGE_SIZE)
    }
}

impl FeedbackStore {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: page_size.max(1),
            status_filter: None,
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[Feedback] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Feedback> {
        self.items.iter().find(|f| f.id == id)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn status_filter(&self) -> Option<FeedbackStatus> {
        self.status_filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn fetch(&mut self, client: &ApiClient) -> AdminResult<()> {
        self.loading = true;
        let result = list_feedback(client, self.status_filter, self.page, self.page_size).await;
        self.loading = false;

        match result {
            Ok(page) => {
                debug!(count = page.items.len(), total = page.total, page = self.page, "feedback fetched");
                self.items = page.items;
                self.total = page.total;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.toast_message(FALLBACK_ERROR_MESSAGE));
                Err(err)
            }
        }
    }

    /// Returns whether the filter changed (and a refetch is needed).
    pub fn set_status_filter(&mut self, status: Option<FeedbackStatus>) -> bool {
        if self.status_filter == status {
            return false;
        }
        self.status_filter = status;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let last = u32::try_from(self.total_pages().max(1)).unwrap_or(u32::MAX);
        let page = page.clamp(1, last);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Applies a saved record. If it no longer matches the active status
    /// filter it drops out of the current list.
    pub fn apply_update(&mut self, updated: Feedback) {
        let Some(index) = self.items.iter().position(|f| f.id == updated.id) else {
            return;
        };
        match self.status_filter {
            Some(status) if status != updated.status => {
                self.items.remove(index);
                self.total = self.total.saturating_sub(1);
            }
            _ => self.items[index] = updated,
        }
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|f| f.id != id);
        if self.items.len() < before {
            self.total = self.total.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedbackCategory;
    use chrono::Utc;

    fn feedback(id: &str, status: FeedbackStatus) -> Feedback {
        Feedback {
            id: id.into(),
            user_id: None,
            user_email: None,
            category: FeedbackCategory::Bug,
            message: "Audio does not play".into(),
            status,
            admin_response: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn store_with(status_filter: Option<FeedbackStatus>) -> FeedbackStore {
        let mut store = FeedbackStore::new(2);
        store.set_status_filter(status_filter);
        store.items = vec![feedback("a", FeedbackStatus::New), feedback("b", FeedbackStatus::New)];
        store.total = 5;
        store
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut store = store_with(None);
        assert!(store.set_page(3));
        assert!(store.set_status_filter(Some(FeedbackStatus::New)));
        assert_eq!(store.page(), 1);
        assert!(!store.set_status_filter(Some(FeedbackStatus::New)));
    }

    #[test]
    fn test_set_page_clamps_to_known_pages() {
        let mut store = store_with(None);
        assert_eq!(store.total_pages(), 3);
        store.set_page(10);
        assert_eq!(store.page(), 3);
        store.set_page(0);
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_update_leaving_filter_drops_row() {
        let mut store = store_with(Some(FeedbackStatus::New));
        store.apply_update(feedback("a", FeedbackStatus::Resolved));
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total(), 4);
    }

    #[test]
    fn test_update_in_place_without_filter() {
        let mut store = store_with(None);
        store.apply_update(feedback("b", FeedbackStatus::InReview));
        assert_eq!(store.get("b").unwrap().status, FeedbackStatus::InReview);
        assert_eq!(store.total(), 5);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = store_with(None);
        store.remove("zzz");
        assert_eq!(store.total(), 5);
        store.remove("a");
        assert_eq!(store.total(), 4);
    }
}
