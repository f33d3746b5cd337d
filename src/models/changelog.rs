use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::paging::Tagged;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangelogTag {
    NewFeature,
    BugFix,
    Announcement,
}

impl ChangelogTag {
    pub const ALL: [ChangelogTag; 3] =
        [ChangelogTag::NewFeature, ChangelogTag::BugFix, ChangelogTag::Announcement];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewFeature => "new_feature",
            Self::BugFix => "bug_fix",
            Self::Announcement => "announcement",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "new_feature" | "feature" => Some(Self::NewFeature),
            "bug_fix" | "fix" => Some(Self::BugFix),
            "announcement" => Some(Self::Announcement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: ChangelogTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tagged for ChangelogItem {
    type Tag = ChangelogTag;

    fn tag(&self) -> &ChangelogTag {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_wire_format() {
        let json = serde_json::to_string(&ChangelogTag::NewFeature).unwrap();
        assert_eq!(json, "\"new_feature\"");
        let tag: ChangelogTag = serde_json::from_str("\"bug_fix\"").unwrap();
        assert_eq!(tag, ChangelogTag::BugFix);
    }

    #[test]
    fn test_tag_parse_accepts_cli_spellings() {
        assert_eq!(ChangelogTag::parse("new-feature"), Some(ChangelogTag::NewFeature));
        assert_eq!(ChangelogTag::parse("FIX"), Some(ChangelogTag::BugFix));
        assert_eq!(ChangelogTag::parse("release"), None);
        for tag in ChangelogTag::ALL {
            assert_eq!(ChangelogTag::parse(tag.as_str()), Some(tag));
        }
    }
}
