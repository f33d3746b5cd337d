use super::client::ApiClient;
use super::resource::{ListQuery, Resource};
use crate::error::AdminResult;
use crate::models::{Feedback, FeedbackStatus, ListPage};

impl Resource for Feedback {
    const PATH: &'static str = "admin/feedback";
    const LABEL: &'static str = "feedback";

    fn id(&self) -> &str {
        &self.id
    }
}

pub async fn list_feedback(
    client: &ApiClient,
    status: Option<FeedbackStatus>,
    page: u32,
    page_size: u32,
) -> AdminResult<ListPage<Feedback>> {
    let query = ListQuery::page(page, page_size)
        .with_status(status.map(|s| s.as_str()))
        .with_lang(client.lang());
    client.list::<Feedback>(&query).await
}
