use super::resource::Resource;
use crate::models::{Announcement, CultureQuestion, NewsItem};

impl Resource for CultureQuestion {
    const PATH: &'static str = "admin/culture-questions";
    const LABEL: &'static str = "culture question";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for NewsItem {
    const PATH: &'static str = "admin/news";
    const LABEL: &'static str = "news item";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Announcement {
    const PATH: &'static str = "admin/announcements";
    const LABEL: &'static str = "announcement";

    fn id(&self) -> &str {
        &self.id
    }
}
