use tracing::debug;

use crate::api::changelog::fetch_changelog;
use crate::api::ApiClient;
use crate::config::CHANGELOG_FETCH_LIMIT;
use crate::core::paging::{clamp_page, paginate, PagedView};
use crate::error::{AdminResult, FALLBACK_ERROR_MESSAGE};
use crate::models::{ChangelogItem, ChangelogTag};

/// Changelog list state. The full (capped) set is fetched once; tag and page
/// changes are derived in memory without further requests.
#[derive(Debug, Clone)]
pub struct ChangelogStore {
    all_items: Vec<ChangelogItem>,
    active_tag: Option<ChangelogTag>,
    page: usize,
    page_size: usize,
    loading: bool,
    loaded: bool,
    error: Option<String>,
}

impl ChangelogStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            all_items: Vec::new(),
            active_tag: None,
            page: 1,
            page_size: page_size.max(1),
            loading: false,
            loaded: false,
            error: None,
        }
    }

    pub fn all_items(&self) -> &[ChangelogItem] {
        &self.all_items
    }

    pub fn active_tag(&self) -> Option<ChangelogTag> {
        self.active_tag
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn fetch(&mut self, client: &ApiClient) -> AdminResult<()> {
        self.loading = true;
        let result = fetch_changelog(client, 1, CHANGELOG_FETCH_LIMIT).await;
        self.loading = false;

        match result {
            Ok(page) => {
                debug!(count = page.items.len(), total = page.total, "changelog fetched");
                self.replace_items(page.items);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.toast_message(FALLBACK_ERROR_MESSAGE));
                Err(err)
            }
        }
    }

    /// Replaces the whole collection, as a fresh fetch does.
    pub fn replace_items(&mut self, items: Vec<ChangelogItem>) {
        self.all_items = items;
        self.page = 1;
        self.loaded = true;
        self.error = None;
    }

    /// Changing the filter always returns to the first page.
    pub fn set_tag(&mut self, tag: Option<ChangelogTag>) {
        self.active_tag = tag;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: i64) {
        let total_pages = self.view().total_pages;
        self.page = clamp_page(page, total_pages);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn view(&self) -> PagedView<ChangelogItem> {
        let page = i64::try_from(self.page).unwrap_or(i64::MAX);
        paginate(&self.all_items, self.active_tag.as_ref(), page, self.page_size)
    }

    /// Newest first, so a created entry goes to the front.
    pub fn insert(&mut self, item: ChangelogItem) {
        self.all_items.retain(|existing| existing.id != item.id);
        self.all_items.insert(0, item);
    }

    pub fn apply_update(&mut self, item: ChangelogItem) {
        if let Some(slot) = self.all_items.iter_mut().find(|existing| existing.id == item.id) {
            *slot = item;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.all_items.retain(|item| item.id != id);
        let total_pages = self.view().total_pages;
        self.page = clamp_page(self.page as i64, total_pages);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }
}
