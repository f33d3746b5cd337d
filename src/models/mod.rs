pub mod announcement;
pub mod card;
pub mod changelog;
pub mod culture;
pub mod feedback;
pub mod news;

use serde::{Deserialize, Serialize};

pub use announcement::{Announcement, AnnouncementLevel};
pub use card::{AudioStatus, CardErrorReport, CardErrorStatus, VocabularyCard};
pub use changelog::{ChangelogItem, ChangelogTag};
pub use culture::CultureQuestion;
pub use feedback::{Feedback, FeedbackCategory, FeedbackStatus};
pub use news::NewsItem;

/// Envelope returned by every paged listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0, page: 1, page_size: 0 }
    }
}
