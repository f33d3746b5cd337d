//! Typed form values for every editable screen.
//!
//! Dirty tracking is explicit: each form compares its before/after values
//! field by field instead of relying on a form library's bookkeeping.

pub mod card;
pub mod changelog;
pub mod content;
pub mod feedback;

use serde_json::Value;

use crate::core::diff::{DirtyFields, Patch};
use crate::core::validation::ValidationErrors;

pub use card::{CardErrorForm, WordEntryForm};
pub use changelog::ChangelogEntryForm;
pub use content::{AnnouncementForm, CultureQuestionForm, NewsForm};
pub use feedback::FeedbackResponseForm;

pub trait EditForm: Clone + PartialEq + Default {
    /// Fields whose values differ between `original` and `current`.
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields;

    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Minimal update body for the fields in `dirty`.
    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch;
}

/// Forms that can also create a new record.
pub trait CreateForm: EditForm {
    fn create_body(&self) -> Value;
}

/// Minimal update payload: only keys in `dirty` that really changed.
pub fn build_diff<F: EditForm>(original: &F, current: &F, dirty: &DirtyFields) -> Patch {
    current.patch(original, dirty)
}

pub(crate) fn text_or_null(value: &str) -> Value {
    match value.trim() {
        "" => Value::Null,
        trimmed => Value::String(trimmed.to_string()),
    }
}
