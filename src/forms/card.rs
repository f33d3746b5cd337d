use crate::core::diff::{Blank, DirtyFields, Patch, PatchBuilder};
use crate::core::validation::ValidationErrors;
use crate::models::{CardErrorReport, CardErrorStatus, VocabularyCard};

use super::EditForm;

/// Word-entry edit dialog on the vocabulary card table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordEntryForm {
    pub word: String,
    pub part_of_speech: String,
    pub translation_en: String,
    pub translation_en_plural: String,
    pub translation_ru: String,
    pub translation_ru_plural: String,
    pub pronunciation: String,
}

impl From<&VocabularyCard> for WordEntryForm {
    fn from(card: &VocabularyCard) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            word: card.word.clone(),
            part_of_speech: text(&card.part_of_speech),
            translation_en: card.translation_en.clone(),
            translation_en_plural: text(&card.translation_en_plural),
            translation_ru: text(&card.translation_ru),
            translation_ru_plural: text(&card.translation_ru_plural),
            pronunciation: text(&card.pronunciation),
        }
    }
}

impl WordEntryForm {
    fn fields(&self) -> [(&'static str, &str, Blank); 7] {
        [
            ("word", self.word.as_str(), Blank::Skip),
            ("part_of_speech", self.part_of_speech.as_str(), Blank::Clear),
            ("translation_en", self.translation_en.as_str(), Blank::Skip),
            ("translation_en_plural", self.translation_en_plural.as_str(), Blank::Clear),
            ("translation_ru", self.translation_ru.as_str(), Blank::Clear),
            ("translation_ru_plural", self.translation_ru_plural.as_str(), Blank::Clear),
            ("pronunciation", self.pronunciation.as_str(), Blank::Clear),
        ]
    }
}

impl EditForm for WordEntryForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        for ((name, before, _), (_, after, _)) in original.fields().into_iter().zip(current.fields()) {
            dirty.mark_if(name, before != after);
        }
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("word", &self.word);
        // English singular is mandatory for every card
        errors.required("translation_en", &self.translation_en);
        errors.max_len("word", &self.word, 120);
        errors.max_len("pronunciation", &self.pronunciation, 120);
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        original
            .fields()
            .into_iter()
            .zip(self.fields())
            .fold(PatchBuilder::new(dirty), |builder, ((name, before, blank), (_, after, _))| {
                builder.text(name, Some(before), Some(after), blank)
            })
            .finish()
    }
}

/// Card error detail dialog: resolve a learner's report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardErrorForm {
    pub status: CardErrorStatus,
    pub admin_note: String,
}

impl From<&CardErrorReport> for CardErrorForm {
    fn from(report: &CardErrorReport) -> Self {
        Self {
            status: report.status,
            admin_note: report.admin_note.clone().unwrap_or_default(),
        }
    }
}

impl EditForm for CardErrorForm {
    fn dirty_fields(original: &Self, current: &Self) -> DirtyFields {
        let mut dirty = DirtyFields::new();
        dirty.mark_if("status", original.status != current.status);
        dirty.mark_if("admin_note", original.admin_note != current.admin_note);
        dirty
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.max_len("admin_note", &self.admin_note, 1000);
        if self.status == CardErrorStatus::WontFix {
            errors.check(
                "admin_note",
                !self.admin_note.trim().is_empty(),
                "Explain why the report will not be fixed",
            );
        }
        errors.into_result()
    }

    fn patch(&self, original: &Self, dirty: &DirtyFields) -> Patch {
        PatchBuilder::new(dirty)
            .value("status", &original.status, &self.status)
            .text(
                "admin_note",
                Some(original.admin_note.as_str()),
                Some(self.admin_note.as_str()),
                Blank::Clear,
            )
            .finish()
    }
}
