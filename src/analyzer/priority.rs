use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use time::OffsetDateTime;

use super::dates::days_until;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

const HIGH_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "important",
    "critical",
    "emergency",
    "immediately",
    "deadline",
    "high priority",
    "top priority",
    "must do",
    "must be",
    "must finish",
];

const MEDIUM_KEYWORDS: &[&str] = &[
    "medium priority",
    "soon",
    "this week",
    "should",
    "need to",
    "needs to",
];

const LOW_KEYWORDS: &[&str] = &[
    "low priority",
    "whenever",
    "someday",
    "some day",
    "eventually",
    "maybe",
    "if time",
    "no rush",
];

const PRIORITY_KEYWORDS: [(Priority, &[&str]); 3] = [
    (Priority::High, HIGH_KEYWORDS),
    (Priority::Medium, MEDIUM_KEYWORDS),
    (Priority::Low, LOW_KEYWORDS),
];

/// Keyword-driven priority with a due-date proximity fallback.
///
/// Keywords are plain substring matches and always take precedence over the
/// date. Without either signal the priority is [`Priority::None`].
pub fn predict_priority(text: &str, due: Option<OffsetDateTime>, now: OffsetDateTime) -> Priority {
    let lowered = text.to_lowercase();
    for (priority, keywords) in PRIORITY_KEYWORDS {
        if let Some(keyword) = keywords.iter().find(|keyword| lowered.contains(*keyword)) {
            tracing::trace!(%priority, keyword, "priority keyword matched");
            return priority;
        }
    }

    match due {
        Some(due) => priority_for_days(days_until(now, due)),
        None => Priority::None,
    }
}

fn priority_for_days(days: i64) -> Priority {
    if days <= 1 {
        Priority::High
    } else if days <= 7 {
        Priority::Medium
    } else {
        Priority::Low
    }
}
