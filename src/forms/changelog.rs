use serde_json::{json, Value};

use crate::core::diff::{Blank, DirtyFields, Patch, PatchBuilder};
use crate::core::validation::ValidationErrors;
use crate::models::{ChangelogItem, ChangelogTag};

use super::{CreateForm, EditForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntryForm {
    pub title: String,
    pub content: String,
    pub tag: ChangelogTag,
}

impl Default for ChangelogEntryForm {
    fn default() -> Self {
        Self { title: String::new(), content: String::new(), tag: ChangelogTag::NewFeature }
    }
}

impl From<&ChangelogItem> for ChangelogEntryForm {
    fn from(item: &ChangelogItem) -> Self {
        Self { title: item.title.clone(), content: item.content.clone(), tag: item.tag }
    }
}

impl EditForm for ChangelogEntryForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        dirty.mark_if("title", original.title != current.title);
        dirty.mark_if("content", original.content != current.content);
        dirty.mark_if("tag", original.tag != current.tag);
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.max_len("title", &self.title, 200);
        errors.required("content", &self.content);
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        PatchBuilder::new(dirty)
            .text("title", Some(original.title.as_str()), Some(self.title.as_str()), Blank::Skip)
            .text("content", Some(original.content.as_str()), Some(self.content.as_str()), Blank::Skip)
            .value("tag", &original.tag, &self.tag)
            .finish()
    }
}

impl CreateForm for ChangelogEntryForm {
    fn create_body(&self) -> Value {
        json!({
            "title": self.title.trim(),
            "content": self.content.trim(),
            "tag": self.tag,
        })
    }
}
