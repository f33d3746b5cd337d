use crate::core::diff::{Blank, DirtyFields, Patch, PatchBuilder};
use crate::core::validation::ValidationErrors;
use crate::models::{Feedback, FeedbackStatus};

use super::EditForm;

pub const MAX_RESPONSE_LEN: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackResponseForm {
    pub status: FeedbackStatus,
    pub admin_response: String,
}

impl From<&Feedback> for FeedbackResponseForm {
    fn from(feedback: &Feedback) -> Self {
        Self {
            status: feedback.status,
            admin_response: feedback.admin_response.clone().unwrap_or_default(),
        }
    }
}

impl EditForm for FeedbackResponseForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        dirty.mark_if("status", original.status != current.status);
        dirty.mark_if("admin_response", original.admin_response != current.admin_response);
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.max_len("admin_response", &self.admin_response, MAX_RESPONSE_LEN);
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        PatchBuilder::new(dirty)
            .value("status", &original.status, &self.status)
            .text(
                "admin_response",
                Some(original.admin_response.as_str()),
                Some(self.admin_response.as_str()),
                Blank::Clear,
            )
            .finish()
    }
}
