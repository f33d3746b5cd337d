use super::client::ApiClient;
use super::resource::{ListQuery, Resource};
use crate::error::AdminResult;
use crate::models::{CardErrorReport, CardErrorStatus, ListPage, VocabularyCard};

impl Resource for VocabularyCard {
    const PATH: &'static str = "admin/cards";
    const LABEL: &'static str = "vocabulary card";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for CardErrorReport {
    const PATH: &'static str = "admin/card-errors";
    const LABEL: &'static str = "card error report";

    fn id(&self) -> &str {
        &self.id
    }
}

pub async fn list_card_errors(
    client: &ApiClient,
    status: Option<CardErrorStatus>,
    page: u32,
    page_size: u32,
) -> AdminResult<ListPage<CardErrorReport>> {
    let query = ListQuery::page(page, page_size)
        .with_status(status.map(|s| s.as_str()))
        .with_lang(client.lang());
    client.list::<CardErrorReport>(&query).await
}
