use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::core::diff::{Blank, DirtyFields, Patch, PatchBuilder};
use crate::core::validation::ValidationErrors;
use crate::models::{Announcement, AnnouncementLevel, CultureQuestion, NewsItem};

use super::{text_or_null, CreateForm, EditForm};

const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementForm {
    pub title: String,
    pub body: String,
    pub level: AnnouncementLevel,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl From<&Announcement> for AnnouncementForm {
    fn from(a: &Announcement) -> Self {
        Self {
            title: a.title.clone(),
            body: a.body.clone(),
            level: a.level,
            is_active: a.is_active,
            starts_at: a.starts_at,
            ends_at: a.ends_at,
        }
    }
}

impl EditForm for AnnouncementForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        dirty.mark_if("title", original.title != current.title);
        dirty.mark_if("body", original.body != current.body);
        dirty.mark_if("level", original.level != current.level);
        dirty.mark_if("is_active", original.is_active != current.is_active);
        dirty.mark_if("starts_at", original.starts_at != current.starts_at);
        dirty.mark_if("ends_at", original.ends_at != current.ends_at);
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.max_len("title", &self.title, MAX_TITLE_LEN);
        errors.required("body", &self.body);
        if let (Some(start), Some(end)) = (self.starts_at, self.ends_at) {
            errors.check("ends_at", end > start, "End must be after start");
        }
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        PatchBuilder::new(dirty)
            .text("title", Some(original.title.as_str()), Some(self.title.as_str()), Blank::Skip)
            .text("body", Some(original.body.as_str()), Some(self.body.as_str()), Blank::Skip)
            .value("level", &original.level, &self.level)
            .value("is_active", &original.is_active, &self.is_active)
            .value("starts_at", &original.starts_at, &self.starts_at)
            .value("ends_at", &original.ends_at, &self.ends_at)
            .finish()
    }
}

impl CreateForm for AnnouncementForm {
    fn create_body(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "body": self.body.trim(),
            "level": self.level,
            "is_active": self.is_active,
            "starts_at": self.starts_at,
            "ends_at": self.ends_at,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsForm {
    pub title: String,
    pub summary: String,
    pub body: String,
    pub source_url: String,
    pub is_published: bool,
}

impl From<&NewsItem> for NewsForm {
    fn from(n: &NewsItem) -> Self {
        Self {
            title: n.title.clone(),
            summary: n.summary.clone().unwrap_or_default(),
            body: n.body.clone(),
            source_url: n.source_url.clone().unwrap_or_default(),
            is_published: n.is_published,
        }
    }
}

impl EditForm for NewsForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        dirty.mark_if("title", original.title != current.title);
        dirty.mark_if("summary", original.summary != current.summary);
        dirty.mark_if("body", original.body != current.body);
        dirty.mark_if("source_url", original.source_url != current.source_url);
        dirty.mark_if("is_published", original.is_published != current.is_published);
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.max_len("title", &self.title, MAX_TITLE_LEN);
        errors.max_len("summary", &self.summary, 500);
        errors.required("body", &self.body);
        let url = self.source_url.trim();
        errors.check(
            "source_url",
            url.is_empty() || url.starts_with("https://") || url.starts_with("http://"),
            "Must be an http(s) URL",
        );
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        PatchBuilder::new(dirty)
            .text("title", Some(original.title.as_str()), Some(self.title.as_str()), Blank::Skip)
            .text("summary", Some(original.summary.as_str()), Some(self.summary.as_str()), Blank::Clear)
            .text("body", Some(original.body.as_str()), Some(self.body.as_str()), Blank::Skip)
            .text(
                "source_url",
                Some(original.source_url.as_str()),
                Some(self.source_url.as_str()),
                Blank::Clear,
            )
            .value("is_published", &original.is_published, &self.is_published)
            .finish()
    }
}

impl CreateForm for NewsForm {
    fn create_body(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "summary": text_or_null(&self.summary),
            "body": self.body.trim(),
            "source_url": text_or_null(&self.source_url),
            "is_published": self.is_published,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CultureQuestionForm {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: u32,
    pub explanation: String,
    pub category: String,
    pub is_active: bool,
}

impl From<&CultureQuestion> for CultureQuestionForm {
    fn from(q: &CultureQuestion) -> Self {
        Self {
            question: q.question.clone(),
            options: q.options.clone(),
            correct_index: q.correct_index,
            explanation: q.explanation.clone().unwrap_or_default(),
            category: q.category.clone().unwrap_or_default(),
            is_active: q.is_active,
        }
    }
}

impl CultureQuestionForm {
    /// Options as they will be stored: trimmed, blanks dropped.
    pub fn normalized_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Position of the chosen answer within `normalized_options`. `None` when
    /// the index is out of range or points at a blank option.
    pub fn normalized_correct_index(&self) -> Option<u32> {
        let chosen = self.options.get(self.correct_index as usize)?;
        if chosen.trim().is_empty() {
            return None;
        }
        let blanks_before = self.options[..self.correct_index as usize]
            .iter()
            .filter(|o| o.trim().is_empty())
            .count() as u32;
        Some(self.correct_index - blanks_before)
    }
}

impl EditForm for CultureQuestionForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        dirty.mark_if("question", original.question != current.question);
        dirty.mark_if("options", original.options != current.options);
        dirty.mark_if(
            "correct_index",
            original.correct_index != current.correct_index
                || original.normalized_correct_index() != current.normalized_correct_index(),
        );
        dirty.mark_if("explanation", original.explanation != current.explanation);
        dirty.mark_if("category", original.category != current.category);
        dirty.mark_if("is_active", original.is_active != current.is_active);
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("question", &self.question);
        let options = self.normalized_options();
        errors.check("options", options.len() >= 2, "Provide at least two answer options");
        errors.check(
            "correct_index",
            self.normalized_correct_index().is_some(),
            "Correct answer must be one of the options",
        );
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        PatchBuilder::new(dirty)
            .text(
                "question",
                Some(original.question.as_str()),
                Some(self.question.as_str()),
                Blank::Skip,
            )
            .value("options", &original.normalized_options(), &self.normalized_options())
            .value(
                "correct_index",
                &original.normalized_correct_index(),
                &self.normalized_correct_index(),
            )
            .text(
                "explanation",
                Some(original.explanation.as_str()),
                Some(self.explanation.as_str()),
                Blank::Clear,
            )
            .text("category", Some(original.category.as_str()), Some(self.category.as_str()), Blank::Clear)
            .value("is_active", &original.is_active, &self.is_active)
            .finish()
    }
}

impl CreateForm for CultureQuestionForm {
    fn create_body(&self) -> Value {
        json!({
            "question": self.question.trim(),
            "options": self.normalized_options(),
            "correct_index": self.normalized_correct_index(),
            "explanation": text_or_null(&self.explanation),
            "category": text_or_null(&self.category),
            "is_active": self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::build_diff;
    use chrono::TimeZone;

    #[test]
    fn test_announcement_window_validation() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let form = AnnouncementForm {
            title: "Downtime".into(),
            body: "Short maintenance".into(),
            starts_at: Some(start),
            ends_at: Some(start),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("ends_at"), Some("End must be after start"));
    }

    #[test]
    fn test_announcement_create_body_trims() {
        let form = AnnouncementForm {
            title: " Hello ".into(),
            body: "World".into(),
            level: AnnouncementLevel::Critical,
            is_active: true,
            ..Default::default()
        };
        let body = form.create_body();
        assert_eq!(body["title"], "Hello");
        assert_eq!(body["level"], "critical");
        assert!(body["starts_at"].is_null());
    }

    #[test]
    fn test_news_url_validation() {
        let form = NewsForm {
            title: "t".into(),
            body: "b".into(),
            source_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().get("source_url").is_some());
    }

    #[test]
    fn test_news_publish_toggle_patch() {
        let original = NewsForm { title: "t".into(), body: "b".into(), ..Default::default() };
        let current = NewsForm { is_published: true, ..original.clone() };
        let dirty = NewsForm::dirty_fields(&original, &current);
        assert_eq!(
            build_diff(&original, &current, &dirty).into_value(),
            json!({ "is_published": true })
        );
    }

    #[test]
    fn test_culture_options_normalized() {
        let original = CultureQuestionForm {
            question: "Capital of Russia?".into(),
            options: vec!["Moscow".into(), "Kazan".into()],
            ..Default::default()
        };
        let current = CultureQuestionForm {
            options: vec![" Moscow".into(), "Kazan ".into(), "  ".into()],
            ..original.clone()
        };
        let dirty = CultureQuestionForm::dirty_fields(&original, &current);
        assert!(dirty.contains("options"));
        assert!(build_diff(&original, &current, &dirty).is_empty());
    }

    #[test]
    fn test_culture_correct_index_bounds() {
        let form = CultureQuestionForm {
            question: "q".into(),
            options: vec!["a".into(), "b".into()],
            correct_index: 2,
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().get("correct_index").is_some());
    }

    #[test]
    fn test_culture_index_skips_blank_options() {
        let form = CultureQuestionForm {
            question: "Which city is on the Volga?".into(),
            options: vec!["Omsk".into(), "  ".into(), "Kazan".into()],
            correct_index: 2,
            ..Default::default()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.normalized_correct_index(), Some(1));
        let body = form.create_body();
        assert_eq!(body["options"], json!(["Omsk", "Kazan"]));
        assert_eq!(body["correct_index"], 1);

        let blank_pick = CultureQuestionForm { correct_index: 1, ..form.clone() };
        assert_eq!(blank_pick.normalized_correct_index(), None);
        assert!(blank_pick.validate().unwrap_err().get("correct_index").is_some());
    }

    #[test]
    fn test_culture_blank_inserted_before_answer_patches_index() {
        let original = CultureQuestionForm {
            question: "q".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_index: 2,
            ..Default::default()
        };
        let current = CultureQuestionForm {
            options: vec!["a".into(), " ".into(), "c".into()],
            ..original.clone()
        };
        let dirty = CultureQuestionForm::dirty_fields(&original, &current);
        assert_eq!(
            build_diff(&original, &current, &dirty).into_value(),
            json!({ "options": ["a", "c"], "correct_index": 1 })
        );
    }
}
