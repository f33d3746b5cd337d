use serde::Serialize;

use super::client::ApiClient;
use super::resource::Resource;
use crate::config::CHANGELOG_FETCH_LIMIT;
use crate::error::AdminResult;
use crate::models::{ChangelogItem, ListPage};

impl Resource for ChangelogItem {
    const PATH: &'static str = "changelog";
    const LABEL: &'static str = "changelog entry";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize)]
struct ChangelogQuery<'a> {
    page: u32,
    page_size: usize,
    lang: &'a str,
}

/// `GET /changelog`. The backend rejects `page_size` above 50, so larger
/// requests are clamped.
pub async fn fetch_changelog(
    client: &ApiClient,
    page: u32,
    page_size: usize,
) -> AdminResult<ListPage<ChangelogItem>> {
    let query = ChangelogQuery {
        page: page.max(1),
        page_size: page_size.clamp(1, CHANGELOG_FETCH_LIMIT),
        lang: client.lang(),
    };
    client.get_json(ChangelogItem::PATH, &query).await
}
