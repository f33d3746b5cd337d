//! Enrichment completeness chips for vocabulary cards.
//!
//! Each chip summarises one enrichment dimension of a card. English
//! singular is a mandatory field, so the EN chip is never gray while RU can
//! be. The grammar chip is hidden for parts of speech without inflection
//! slots (`grammar_total == 0`).

use serde::Serialize;

use crate::models::AudioStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipName {
    En,
    Ru,
    Pron,
    Audio,
    Gram,
    Ex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Green,
    Yellow,
    Gray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chip {
    pub name: ChipName,
    pub label: String,
    pub color: ChipColor,
    pub tooltip: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExampleStats {
    pub count: u32,
    pub with_en: u32,
    pub with_ru: u32,
    pub with_audio: u32,
}

impl ExampleStats {
    /// Upper bound on examples carrying every enrichment. The backend only
    /// reports per-dimension totals, so the true count may be lower.
    /// Equal to `count` exactly when every dimension is complete.
    pub fn fully_complete(&self) -> u32 {
        self.with_en.min(self.with_ru).min(self.with_audio).min(self.count)
    }
}

/// Read-only view of a card's enrichment state.
pub trait CardCompleteness {
    fn has_en_plural(&self) -> bool;
    fn has_ru_singular(&self) -> bool;
    fn has_ru_plural(&self) -> bool;
    fn has_pronunciation(&self) -> bool;
    fn audio_status(&self) -> AudioStatus;
    /// `(filled, total)` grammar slots.
    fn grammar(&self) -> (u32, u32);
    fn examples(&self) -> ExampleStats;
}

const CHECK: &str = "✓";
const CROSS: &str = "✗";
const PENDING: &str = "…";

fn mark(present: bool) -> &'static str {
    if present {
        CHECK
    } else {
        CROSS
    }
}

fn pair_color(count: u32) -> ChipColor {
    match count {
        2 => ChipColor::Green,
        1 => ChipColor::Yellow,
        _ => ChipColor::Gray,
    }
}

fn chip(name: ChipName, label: String, color: ChipColor, tooltip: String) -> Chip {
    Chip { name, label, color, tooltip, visible: true }
}

fn en_chip(card: &impl CardCompleteness) -> Chip {
    let plural = card.has_en_plural();
    let count = 1 + u32::from(plural);
    chip(
        ChipName::En,
        format!("EN {count}/2"),
        // singular always counts, so this never drops to gray
        pair_color(count),
        format!("English: singular {CHECK}, plural {}", mark(plural)),
    )
}

fn ru_chip(card: &impl CardCompleteness) -> Chip {
    let singular = card.has_ru_singular();
    let plural = card.has_ru_plural();
    let count = u32::from(singular) + u32::from(plural);
    chip(
        ChipName::Ru,
        format!("RU {count}/2"),
        pair_color(count),
        format!("Russian: singular {}, plural {}", mark(singular), mark(plural)),
    )
}

fn pron_chip(card: &impl CardCompleteness) -> Chip {
    let present = card.has_pronunciation();
    let (color, tooltip) = if present {
        (ChipColor::Green, "Pronunciation: present")
    } else {
        (ChipColor::Gray, "Pronunciation: missing")
    };
    chip(ChipName::Pron, format!("Pron {}", mark(present)), color, tooltip.to_string())
}

fn audio_chip(card: &impl CardCompleteness) -> Chip {
    let (symbol, color, tooltip) = match card.audio_status() {
        AudioStatus::Ready => (CHECK, ChipColor::Green, "Audio: ready"),
        AudioStatus::Generating => (PENDING, ChipColor::Yellow, "Audio: generating"),
        AudioStatus::Missing => (CROSS, ChipColor::Gray, "Audio: missing"),
        AudioStatus::Failed => (CROSS, ChipColor::Gray, "Audio: generation failed"),
    };
    chip(ChipName::Audio, format!("Audio {symbol}"), color, tooltip.to_string())
}

fn gram_chip(card: &impl CardCompleteness) -> Chip {
    let (filled, total) = card.grammar();
    if total == 0 {
        return Chip {
            name: ChipName::Gram,
            label: String::new(),
            color: ChipColor::Gray,
            tooltip: "Grammar: not applicable".to_string(),
            visible: false,
        };
    }

    let (color, tooltip) = if filled > total {
        (
            ChipColor::Yellow,
            format!("Grammar forms: {filled} filled but only {total} slots; counts are inconsistent"),
        )
    } else {
        let color = if filled == total {
            ChipColor::Green
        } else if filled > 0 {
            ChipColor::Yellow
        } else {
            ChipColor::Gray
        };
        (color, format!("Grammar forms: {filled} of {total} filled"))
    };
    chip(ChipName::Gram, format!("Gram {filled}/{total}"), color, tooltip)
}

fn ex_chip(card: &impl CardCompleteness) -> Chip {
    let stats = card.examples();
    if stats.count == 0 {
        return chip(
            ChipName::Ex,
            "Ex 0".to_string(),
            ChipColor::Gray,
            "Examples: none".to_string(),
        );
    }

    let all_complete = stats.with_en == stats.count
        && stats.with_ru == stats.count
        && stats.with_audio == stats.count;
    let color = if all_complete { ChipColor::Green } else { ChipColor::Yellow };

    chip(
        ChipName::Ex,
        format!("Ex {}/{}", stats.fully_complete(), stats.count),
        color,
        format!(
            "Examples: {} total; EN {}/{n}, RU {}/{n}, audio {}/{n}",
            stats.count,
            stats.with_en,
            stats.with_ru,
            stats.with_audio,
            n = stats.count
        ),
    )
}

/// Computes the six chips for `card`, in display order. The grammar chip is
/// present but `visible == false` when the card has no grammar slots.
pub fn classify(card: &impl CardCompleteness) -> Vec<Chip> {
    vec![
        en_chip(card),
        ru_chip(card),
        pron_chip(card),
        audio_chip(card),
        gram_chip(card),
        ex_chip(card),
    ]
}

/// Only the chips a row should render.
pub fn visible_chips(card: &impl CardCompleteness) -> Vec<Chip> {
    classify(card).into_iter().filter(|c| c.visible).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Stub {
        en_plural: bool,
        ru: (bool, bool),
        pron: bool,
        audio: AudioStatus,
        grammar: (u32, u32),
        examples: ExampleStats,
    }

    impl CardCompleteness for Stub {
        fn has_en_plural(&self) -> bool {
            self.en_plural
        }
        fn has_ru_singular(&self) -> bool {
            self.ru.0
        }
        fn has_ru_plural(&self) -> bool {
            self.ru.1
        }
        fn has_pronunciation(&self) -> bool {
            self.pron
        }
        fn audio_status(&self) -> AudioStatus {
            self.audio
        }
        fn grammar(&self) -> (u32, u32) {
            self.grammar
        }
        fn examples(&self) -> ExampleStats {
            self.examples
        }
    }

    fn find(chips: &[Chip], name: ChipName) -> &Chip {
        chips.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_en_chip_never_gray() {
        let chips = classify(&Stub::default());
        let en = find(&chips, ChipName::En);
        assert_eq!(en.color, ChipColor::Yellow);
        assert_eq!(en.label, "EN 1/2");

        let chips = classify(&Stub { en_plural: true, ..Default::default() });
        assert_eq!(find(&chips, ChipName::En).color, ChipColor::Green);
        assert_eq!(find(&chips, ChipName::En).label, "EN 2/2");
    }

    #[test]
    fn test_ru_chip_levels() {
        let gray = classify(&Stub::default());
        assert_eq!(find(&gray, ChipName::Ru).color, ChipColor::Gray);
        assert_eq!(find(&gray, ChipName::Ru).label, "RU 0/2");

        let yellow = classify(&Stub { ru: (false, true), ..Default::default() });
        assert_eq!(find(&yellow, ChipName::Ru).color, ChipColor::Yellow);

        let green = classify(&Stub { ru: (true, true), ..Default::default() });
        assert_eq!(find(&green, ChipName::Ru).color, ChipColor::Green);
        assert_eq!(
            find(&green, ChipName::Ru).tooltip,
            "Russian: singular ✓, plural ✓"
        );
    }

    #[test]
    fn test_pron_is_binary() {
        let chips = classify(&Stub { pron: true, ..Default::default() });
        assert_eq!(find(&chips, ChipName::Pron).color, ChipColor::Green);
        assert_eq!(find(&chips, ChipName::Pron).label, "Pron ✓");

        let chips = classify(&Stub::default());
        assert_eq!(find(&chips, ChipName::Pron).color, ChipColor::Gray);
        assert_eq!(find(&chips, ChipName::Pron).label, "Pron ✗");
    }

    #[test]
    fn test_audio_status_mapping() {
        let cases = [
            (AudioStatus::Ready, ChipColor::Green, "Audio ✓"),
            (AudioStatus::Generating, ChipColor::Yellow, "Audio …"),
            (AudioStatus::Missing, ChipColor::Gray, "Audio ✗"),
            (AudioStatus::Failed, ChipColor::Gray, "Audio ✗"),
        ];
        for (status, color, label) in cases {
            let chips = classify(&Stub { audio: status, ..Default::default() });
            let audio = find(&chips, ChipName::Audio);
            assert_eq!(audio.color, color, "{status:?}");
            assert_eq!(audio.label, label);
        }
    }

    #[test]
    fn test_gram_full_and_hidden() {
        let chips = classify(&Stub { grammar: (9, 9), ..Default::default() });
        let gram = find(&chips, ChipName::Gram);
        assert_eq!(gram.color, ChipColor::Green);
        assert_eq!(gram.label, "Gram 9/9");
        assert!(gram.visible);

        let stub = Stub { grammar: (0, 0), ..Default::default() };
        assert!(!find(&classify(&stub), ChipName::Gram).visible);
        assert!(visible_chips(&stub).iter().all(|c| c.name != ChipName::Gram));
        assert_eq!(visible_chips(&stub).len(), 5);
    }

    #[test]
    fn test_gram_partial_and_empty() {
        let chips = classify(&Stub { grammar: (5, 9), ..Default::default() });
        assert_eq!(find(&chips, ChipName::Gram).color, ChipColor::Yellow);
        assert_eq!(find(&chips, ChipName::Gram).label, "Gram 5/9");

        let chips = classify(&Stub { grammar: (0, 9), ..Default::default() });
        assert_eq!(find(&chips, ChipName::Gram).color, ChipColor::Gray);
    }

    #[test]
    fn test_gram_overfilled_is_not_green() {
        let chips = classify(&Stub { grammar: (10, 9), ..Default::default() });
        let gram = find(&chips, ChipName::Gram);
        assert_eq!(gram.color, ChipColor::Yellow);
        assert_eq!(gram.label, "Gram 10/9");
        assert!(gram.tooltip.contains("inconsistent"));
    }

    #[test]
    fn test_examples_partial_is_yellow() {
        let stub = Stub {
            examples: ExampleStats { count: 2, with_en: 1, with_ru: 2, with_audio: 2 },
            ..Default::default()
        };
        let chips = classify(&stub);
        let ex = find(&chips, ChipName::Ex);
        assert_eq!(ex.color, ChipColor::Yellow);
        assert_eq!(ex.label, "Ex 1/2");
    }

    #[test]
    fn test_examples_fully_complete_is_upper_bound() {
        // EN, RU and audio may each sit on a different example, so none is
        // necessarily complete; the count never claims more than the minimum.
        let stats = ExampleStats { count: 2, with_en: 1, with_ru: 1, with_audio: 1 };
        assert_eq!(stats.fully_complete(), 1);
        let chips = classify(&Stub { examples: stats, ..Default::default() });
        let ex = find(&chips, ChipName::Ex);
        assert_eq!(ex.label, "Ex 1/2");
        assert_eq!(ex.color, ChipColor::Yellow);

        let full = ExampleStats { count: 2, with_en: 2, with_ru: 2, with_audio: 2 };
        assert_eq!(full.fully_complete(), full.count);
    }

    #[test]
    fn test_examples_complete_and_none() {
        let stub = Stub {
            examples: ExampleStats { count: 3, with_en: 3, with_ru: 3, with_audio: 3 },
            ..Default::default()
        };
        assert_eq!(find(&classify(&stub), ChipName::Ex).color, ChipColor::Green);

        let none = classify(&Stub::default());
        assert_eq!(find(&none, ChipName::Ex).color, ChipColor::Gray);
        assert_eq!(find(&none, ChipName::Ex).label, "Ex 0");
    }

    #[test]
    fn test_order_is_stable() {
        let names: Vec<ChipName> = classify(&Stub::default()).iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                ChipName::En,
                ChipName::Ru,
                ChipName::Pron,
                ChipName::Audio,
                ChipName::Gram,
                ChipName::Ex
            ]
        );
    }
}
