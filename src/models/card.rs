use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::completeness::{CardCompleteness, ExampleStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioStatus {
    Ready,
    #[default]
    Missing,
    Generating,
    Failed,
}

/// A vocabulary card as listed by the admin API, including the enrichment
/// statistics the backend precomputes for the completeness chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyCard {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    pub translation_en: String,
    #[serde(default)]
    pub translation_en_plural: Option<String>,
    #[serde(default)]
    pub translation_ru: Option<String>,
    #[serde(default)]
    pub translation_ru_plural: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub audio_status: AudioStatus,
    #[serde(default)]
    pub grammar_filled: u32,
    #[serde(default)]
    pub grammar_total: u32,
    #[serde(default)]
    pub example_count: u32,
    #[serde(default)]
    pub examples_with_en: u32,
    #[serde(default)]
    pub examples_with_ru: u32,
    #[serde(default)]
    pub examples_with_audio: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl CardCompleteness for VocabularyCard {
    fn has_en_plural(&self) -> bool {
        present(&self.translation_en_plural)
    }

    fn has_ru_singular(&self) -> bool {
        present(&self.translation_ru)
    }

    fn has_ru_plural(&self) -> bool {
        present(&self.translation_ru_plural)
    }

    fn has_pronunciation(&self) -> bool {
        present(&self.pronunciation)
    }

    fn audio_status(&self) -> AudioStatus {
        self.audio_status
    }

    fn grammar(&self) -> (u32, u32) {
        (self.grammar_filled, self.grammar_total)
    }

    fn examples(&self) -> ExampleStats {
        ExampleStats {
            count: self.example_count,
            with_en: self.examples_with_en,
            with_ru: self.examples_with_ru,
            with_audio: self.examples_with_audio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardErrorStatus {
    #[default]
    Open,
    Fixed,
    WontFix,
}

impl CardErrorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Fixed => "fixed",
            Self::WontFix => "wont_fix",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "open" => Some(Self::Open),
            "fixed" => Some(Self::Fixed),
            "wont_fix" | "wontfix" => Some(Self::WontFix),
            _ => None,
        }
    }
}

/// A learner-submitted report about a mistake on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardErrorReport {
    pub id: String,
    pub card_id: String,
    #[serde(default)]
    pub word: Option<String>,
    pub description: String,
    #[serde(default)]
    pub status: CardErrorStatus,
    #[serde(default)]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
}
