//! Subtask suggestions built from explicit lists and matched segments.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::cleanup::capitalize_first;
use super::segments::{detect_segments, Segment};

pub const DEFAULT_ICON: &str = "checkmark-circle-outline";
pub const DEFAULT_COLOR: &str = "#6C757D";

/// Items at or below this many characters are dropped.
const MIN_ITEM_CHARS: usize = 2;
/// Items at or above this many characters are dropped.
const MAX_ITEM_CHARS: usize = 50;
/// A single leftover suggestion is not worth showing.
const MIN_SUGGESTIONS: usize = 2;

const CONNECTOR_WORDS: &[&str] = &["and", "or", "then", "next", "after"];

const ACTION_VERBS: &[&str] = &[
    "buy", "call", "email", "clean", "fix", "pick", "pay", "book", "send", "write", "read",
    "finish", "prepare", "organize", "schedule", "check", "update", "review", "plan", "cook",
    "wash", "order", "visit", "text", "submit", "print", "pack", "return", "water", "walk",
    "feed", "study", "practice", "learn", "file", "renew", "cancel", "sort", "make", "get",
];

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\b(?:steps|to\s*do|tasks|checklist)\s*:\s*(.*)")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("valid list marker pattern")
});

static LIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\r?\n|[,;•·]|\s+(?:and|or)\s+|\s+[-*]\s+|\s+\d+[.)]\s+")
        .case_insensitive(true)
        .build()
        .expect("valid list separator pattern")
});

static ITEM_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•·]\s*|\d+[.)]\s+)").expect("valid item prefix pattern")
});

static ACTION_LIST: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(&format!(r"\b({})\s+(.+)", ACTION_VERBS.join("|")))
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("valid action verb pattern")
});

static ACTION_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r",\s*(?:(?:and|or)\s+)?|\s+(?:and|or)\s+")
        .case_insensitive(true)
        .build()
        .expect("valid action separator pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "segment", rename_all = "lowercase")]
pub enum SuggestionSource {
    Explicit,
    Segment(Segment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskSuggestion {
    pub text: String,
    pub source: SuggestionSource,
    pub icon: String,
    pub color: String,
}

impl SubtaskSuggestion {
    /// Typed items borrow the look of the first segment they mention.
    fn explicit(text: String) -> Self {
        let (icon, color) = match detect_segments(&text).first() {
            Some(segment) => (segment.icon(), segment.color()),
            None => (DEFAULT_ICON, DEFAULT_COLOR),
        };
        Self {
            text,
            source: SuggestionSource::Explicit,
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    fn from_segment(text: String, segment: Segment) -> Self {
        Self {
            text,
            source: SuggestionSource::Segment(segment),
            icon: segment.icon().to_string(),
            color: segment.color().to_string(),
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self.source, SuggestionSource::Explicit)
    }
}

/// Pulls list items the user typed out explicitly.
///
/// A marker such as `steps:` or `checklist:` turns everything after it into
/// items. Without a marker, an action verb followed by two or more
/// comma/and/or separated objects ("buy milk, eggs and bread") is expanded
/// into one item per object.
pub fn extract_explicit_subtasks(text: &str) -> Vec<String> {
    if let Some(caps) = LIST_MARKER.captures(text) {
        let rest = caps.get(1).map_or("", |m| m.as_str());
        return LIST_SEPARATOR
            .split(rest)
            .map(|item| ITEM_PREFIX.replace(item, "").trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
    }

    let Some(caps) = ACTION_LIST.captures(text) else {
        return Vec::new();
    };
    let verb = caps.get(1).map_or("", |m| m.as_str());
    let rest = caps.get(2).map_or("", |m| m.as_str());
    let items: Vec<&str> = ACTION_SEPARATOR
        .split(rest)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if items.len() <= 1 {
        return Vec::new();
    }

    items
        .into_iter()
        .map(|item| {
            if starts_with_action_verb(item) {
                item.to_string()
            } else {
                format!("{verb} {item}")
            }
        })
        .collect()
}

fn starts_with_action_verb(item: &str) -> bool {
    item.split_whitespace()
        .next()
        .map(|word| ACTION_VERBS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Explicit items plus the checklists of every matched segment, cleaned up,
/// de-duplicated and capped at `max_suggestions`.
///
/// Returns an empty list when fewer than two usable suggestions remain.
pub fn suggest_subtasks(text: &str, max_suggestions: usize) -> Vec<SubtaskSuggestion> {
    let segments = detect_segments(text);
    tracing::debug!(?segments, "segments detected");

    let explicit = extract_explicit_subtasks(text)
        .into_iter()
        .map(SubtaskSuggestion::explicit);
    let from_segments = segments.into_iter().flat_map(|segment| {
        segment
            .subtasks()
            .iter()
            .map(move |subtask| SubtaskSuggestion::from_segment(subtask.to_string(), segment))
    });

    let mut unique: IndexMap<String, SubtaskSuggestion> = IndexMap::new();
    for mut suggestion in explicit.chain(from_segments) {
        suggestion.text = normalize_item(&suggestion.text);
        if !is_usable(&suggestion.text) {
            continue;
        }
        unique
            .entry(suggestion.text.to_lowercase())
            .or_insert(suggestion);
    }

    if unique.len() < MIN_SUGGESTIONS {
        return Vec::new();
    }

    let mut suggestions: Vec<SubtaskSuggestion> = unique.into_values().collect();
    suggestions.sort_by_key(|suggestion| !suggestion.is_explicit());
    suggestions.truncate(max_suggestions);
    suggestions
}

fn normalize_item(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_to = match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("to ") => &trimmed[3..],
        _ => trimmed,
    };
    let without_period = without_to.trim().trim_end_matches('.').trim_end();
    capitalize_first(without_period)
}

fn is_usable(item: &str) -> bool {
    let chars = item.chars().count();
    if chars <= MIN_ITEM_CHARS || chars >= MAX_ITEM_CHARS {
        return false;
    }
    let lowered = item.to_lowercase();
    !CONNECTOR_WORDS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn explicit_marker_splits_on_commas() {
        assert_eq!(
            extract_explicit_subtasks("Steps: buy milk, walk dog, call mom"),
            vec!["buy milk", "walk dog", "call mom"]
        );
    }

    #[test]
    fn explicit_marker_handles_bullets_and_numbers() {
        let text = "Checklist:\n- pack bag\n- charge phone\n1. lock door; 2) water plants";
        assert_eq!(
            extract_explicit_subtasks(text),
            vec!["pack bag", "charge phone", "lock door", "water plants"]
        );
    }

    #[test]
    fn explicit_marker_accepts_to_do_variants() {
        assert_eq!(
            extract_explicit_subtasks("weekend to do: laundry and groceries or cinema"),
            vec!["laundry", "groceries", "cinema"]
        );
        assert_eq!(
            extract_explicit_subtasks("TODO: a; b"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn action_verb_list_expands_each_object() {
        assert_eq!(
            extract_explicit_subtasks("buy milk, eggs and bread"),
            vec!["buy milk", "buy eggs", "buy bread"]
        );
        assert_eq!(
            extract_explicit_subtasks("I need to buy groceries and pay bills"),
            vec!["buy groceries", "pay bills"]
        );
    }

    #[test]
    fn single_action_object_is_not_a_list() {
        assert!(extract_explicit_subtasks("call mom").is_empty());
        assert!(extract_explicit_subtasks("think about the weekend").is_empty());
        assert!(extract_explicit_subtasks("").is_empty());
    }

    #[test]
    fn normalize_strips_to_and_period() {
        assert_eq!(normalize_item("  to call the bank. "), "Call the bank");
        assert_eq!(normalize_item("TO Do it"), "Do it");
        assert_eq!(normalize_item("tomatoes"), "Tomatoes");
    }

    #[test]
    fn usability_filters_length_and_connectors() {
        assert!(!is_usable("ab"));
        assert!(is_usable("abc"));
        assert!(!is_usable(&"x".repeat(50)));
        assert!(is_usable(&"x".repeat(49)));
        assert!(!is_usable("Then"));
        assert!(!is_usable("after"));
    }

    #[test]
    fn explicit_items_come_before_segment_items() {
        let suggestions = suggest_subtasks("Steps: vacuum, dust shelves, mop kitchen", 7);
        assert_eq!(suggestions.len(), 7);
        assert_eq!(suggestions[0].text, "Vacuum");
        assert_eq!(suggestions[1].text, "Dust shelves");
        assert_eq!(suggestions[2].text, "Mop kitchen");
        assert_matches!(suggestions[0].source, SuggestionSource::Explicit);
        assert_eq!(suggestions[0].icon, Segment::House.icon());
        assert_matches!(suggestions[3].source, SuggestionSource::Segment(Segment::House));
        assert_eq!(suggestions[3].color, Segment::House.color());
    }

    #[test]
    fn explicit_items_take_the_look_of_their_segment() {
        let suggestions = suggest_subtasks("Steps: buy milk, walk dog, read novel", 7);
        assert_eq!(suggestions[0].text, "Buy milk");
        assert_matches!(suggestions[0].source, SuggestionSource::Explicit);
        assert_eq!(suggestions[0].icon, "cart-outline");
        assert_eq!(suggestions[0].color, Segment::Shopping.color());
        assert_eq!(suggestions[1].text, "Walk dog");
        assert_eq!(suggestions[1].icon, "paw-outline");
        assert_eq!(suggestions[2].text, "Read novel");
        assert_eq!(suggestions[2].icon, DEFAULT_ICON);
        assert_eq!(suggestions[2].color, DEFAULT_COLOR);
    }

    #[test]
    fn decimal_numbers_are_not_list_markers() {
        assert_eq!(
            extract_explicit_subtasks("Checklist: 3.5 kg flour, 2 eggs\n1. preheat oven"),
            vec!["3.5 kg flour", "2 eggs", "preheat oven"]
        );
    }

    #[test]
    fn duplicates_are_dropped_case_insensitively() {
        let suggestions =
            suggest_subtasks("checklist: wash the car, WASH THE CAR, check tire pressure", 10);
        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Wash the car",
                "Check tire pressure",
                "Book service appointment",
                "Fill up the tank",
            ]
        );
        assert!(suggestions[0].is_explicit());
        assert!(suggestions[1].is_explicit());
        assert_matches!(suggestions[2].source, SuggestionSource::Segment(Segment::Car));
    }

    #[test]
    fn multiple_segments_contribute() {
        let suggestions = suggest_subtasks("clean the kitchen and submit report for work", 20);
        assert!(suggestions
            .iter()
            .any(|s| s.source == SuggestionSource::Segment(Segment::House)));
        assert!(suggestions
            .iter()
            .any(|s| s.source == SuggestionSource::Segment(Segment::Work)));
    }

    #[test]
    fn results_are_capped() {
        let suggestions = suggest_subtasks("clean the kitchen and submit report for work", 7);
        assert_eq!(suggestions.len(), 7);
    }

    #[test]
    fn fewer_than_two_candidates_yield_nothing() {
        assert!(suggest_subtasks("steps: ok", 7).is_empty());
        assert!(suggest_subtasks("ponder the meaning", 7).is_empty());
        assert!(suggest_subtasks("", 7).is_empty());
    }
}
