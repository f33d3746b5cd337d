//! Generic CRUD over the backend's collection endpoints.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::client::ApiClient;
use crate::core::diff::Patch;
use crate::error::AdminResult;
use crate::models::ListPage;

/// An entity exposed as `PATH` (list/create) and `PATH/{id}` (get/patch/delete).
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    const PATH: &'static str;
    /// Human name used in logs and toasts.
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl ListQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self { page: Some(page.max(1)), page_size: Some(page_size.max(1)), ..Self::default() }
    }

    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    pub fn with_status(mut self, status: Option<&str>) -> Self {
        self.status = status.map(str::to_string);
        self
    }

    /// Content language for localized fields. A blank code leaves it unset.
    pub fn with_lang(mut self, lang: &str) -> Self {
        let lang = lang.trim();
        self.lang = (!lang.is_empty()).then(|| lang.to_string());
        self
    }
}

pub fn item_path<R: Resource>(id: &str) -> String {
    format!("{}/{}", R::PATH, urlencoding::encode(id))
}

impl ApiClient {
    pub async fn list<R: Resource>(&self, query: &ListQuery) -> AdminResult<ListPage<R>> {
        self.get_json(R::PATH, query).await
    }

    pub async fn fetch<R: Resource>(&self, id: &str) -> AdminResult<R> {
        self.get_json(&item_path::<R>(id), &()).await
    }

    pub async fn create<R, B>(&self, body: &B) -> AdminResult<R>
    where
        R: Resource,
        B: Serialize + ?Sized,
    {
        let created: R = self.post_json(R::PATH, body).await?;
        info!(resource = R::LABEL, id = created.id(), "created");
        Ok(created)
    }

    pub async fn update<R: Resource>(&self, id: &str, patch: &Patch) -> AdminResult<R> {
        let updated: R = self.patch_json(&item_path::<R>(id), patch).await?;
        info!(resource = R::LABEL, id, fields = patch.len(), "updated");
        Ok(updated)
    }

    pub async fn remove<R: Resource>(&self, id: &str) -> AdminResult<()> {
        self.delete(&item_path::<R>(id)).await?;
        info!(resource = R::LABEL, id, "deleted");
        Ok(())
    }
}
