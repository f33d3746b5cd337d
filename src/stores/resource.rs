use tracing::debug;

use crate::api::{ApiClient, ListQuery, Resource};
use crate::error::{AdminError, AdminResult, FALLBACK_ERROR_MESSAGE};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// List state for the server-paged collections (cards, card errors, news,
/// announcements, culture questions). Saved records are folded back in
/// with `upsert`.
#[derive(Debug, Clone)]
pub struct ResourceStore<R: Resource> {
    items: Vec<R>,
    total: u64,
    page: u32,
    page_size: u32,
    search: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl<R: Resource> Default for ResourceStore<R> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: page_size.max(1),
            search: None,
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_search(&mut self, search: Option<String>) {
        let search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        if self.search != search {
            self.search = search;
            self.page = 1;
        }
    }

    fn query(&self, lang: &str) -> ListQuery {
        ListQuery::page(self.page, self.page_size)
            .with_search(self.search.as_deref())
            .with_lang(lang)
    }

    fn record_error(&mut self, err: &AdminError) {
        self.error = Some(err.toast_message(FALLBACK_ERROR_MESSAGE));
    }

    pub async fn fetch(&mut self, client: &ApiClient) -> AdminResult<()> {
        self.loading = true;
        let result = client.list::<R>(&self.query(client.lang())).await;
        self.loading = false;

        match result {
            Ok(page) => {
                debug!(resource = R::LABEL, count = page.items.len(), total = page.total, "list fetched");
                self.items = page.items;
                self.total = page.total;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    pub fn upsert(&mut self, item: R) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => *slot = item,
            None => {
                self.items.insert(0, item);
                self.total += 1;
            }
        }
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() < before {
            self.total = self.total.saturating_sub(1);
        }
    }

    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> AdminResult<()> {
        client.remove::<R>(id).await?;
        self.remove(id);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }
}
