//! Heuristic analysis of free-form task text.
//!
//! Every function in this module is pure: the same text and reference
//! instant always produce the same result. Keyword tables and regexes are
//! process-wide statics compiled on first use.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub mod category;
pub mod cleanup;
pub mod dates;
pub mod priority;
pub mod schedule;
pub mod segments;
pub mod subtasks;
pub mod templates;

pub use category::{detect_task_category, Category};
pub use cleanup::{
    capitalize_words, filter_profanity_and_filler_words, filter_special_characters,
    CleanupOptions,
};
pub use dates::{extract_due_date, next_day_of_week};
pub use priority::{predict_priority, Priority};
pub use schedule::{detect_recurrence, detect_time_of_day, Recurrence, TimeOfDay};
pub use segments::{detect_segments, Segment};
pub use subtasks::{
    extract_explicit_subtasks, suggest_subtasks, SubtaskSuggestion, SuggestionSource,
};
pub use templates::suggest_subtasks_from_templates;

/// Structured hints derived from one version of the task text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub text: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    pub priority: Priority,
    pub category: Category,
    pub time_of_day: Option<TimeOfDay>,
    pub recurring: Option<Recurrence>,
    pub subtasks: Vec<String>,
}

/// [`TaskInfo`] plus the segment-based subtask suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub info: TaskInfo,
    pub suggestions: Vec<SubtaskSuggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Minimum number of non-whitespace characters before anything is suggested.
    pub min_chars: usize,
    /// Upper bound on segment-based subtask suggestions.
    pub max_suggestions: usize,
    /// Strip profanity and filler words from the display text.
    pub filter_profanity: bool,
    pub cleanup: CleanupOptions,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_suggestions: 7,
            filter_profanity: true,
            cleanup: CleanupOptions::default(),
        }
    }
}

/// Composes the cleanup step and every classifier into a [`TaskInfo`].
///
/// Each classifier sees the same lower-cased input; `text` in the result is
/// the cleaned, title-cased version meant for display.
pub fn parse_natural_language(
    input: &str,
    now: OffsetDateTime,
    options: &AnalyzerOptions,
) -> TaskInfo {
    let lowered = input.to_lowercase();

    let stripped = filter_special_characters(input);
    let cleaned = if options.filter_profanity {
        filter_profanity_and_filler_words(&stripped, options.cleanup)
    } else {
        stripped
    };

    let due_date = extract_due_date(&lowered, now);
    TaskInfo {
        text: capitalize_words(&cleaned),
        due_date,
        priority: predict_priority(&lowered, due_date, now),
        category: detect_task_category(&lowered),
        time_of_day: detect_time_of_day(&lowered),
        recurring: detect_recurrence(&lowered),
        subtasks: suggest_subtasks_from_templates(&lowered),
    }
}

/// True once `text` carries at least `min_chars` non-whitespace characters.
pub fn has_enough_text(text: &str, min_chars: usize) -> bool {
    text.chars().filter(|ch| !ch.is_whitespace()).count() >= min_chars
}

/// Runs the full analysis for a text field, honouring the configured
/// minimum length.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// `None` is the "no suggestions" state: the text is still too short.
    pub fn analyze(&self, text: &str, now: OffsetDateTime) -> Option<Analysis> {
        if !has_enough_text(text, self.options.min_chars) {
            tracing::trace!(len = text.len(), "text below suggestion threshold");
            return None;
        }
        let info = parse_natural_language(text, now, &self.options);
        let suggestions = suggest_subtasks(text, self.options.max_suggestions);
        tracing::debug!(
            priority = %info.priority,
            category = %info.category,
            suggestions = suggestions.len(),
            "task text analyzed"
        );
        Some(Analysis { info, suggestions })
    }

    /// Cleans text with the configured cleanup options.
    pub fn clean(&self, text: &str) -> String {
        let stripped = filter_special_characters(text);
        if self.options.filter_profanity {
            filter_profanity_and_filler_words(&stripped, self.options.cleanup)
        } else {
            stripped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use time::macros::datetime;
    use time::Duration;

    fn now() -> OffsetDateTime {
        datetime!(2026-10-18 09:30 UTC)
    }

    #[test]
    fn parse_composes_every_classifier() {
        let info = parse_natural_language(
            "Um, urgent: plan trip to Lisbon tomorrow morning!!",
            now(),
            &AnalyzerOptions::default(),
        );
        assert_eq!(info.text, "Urgent Plan Trip To Lisbon Tomorrow Morning");
        assert_eq!(info.due_date, Some(now() + Duration::days(1)));
        assert_eq!(info.priority, Priority::High);
        assert_eq!(info.category, Category::Default);
        assert_eq!(info.time_of_day, Some(TimeOfDay::Morning));
        assert_eq!(info.recurring, None);
        assert_eq!(info.subtasks.len(), 9);
    }

    #[test]
    fn parse_is_total_on_empty_input() {
        let info = parse_natural_language("", now(), &AnalyzerOptions::default());
        assert_eq!(info.text, "");
        assert_eq!(info.due_date, None);
        assert_eq!(info.priority, Priority::None);
        assert_eq!(info.category, Category::Default);
        assert!(info.subtasks.is_empty());
    }

    #[test]
    fn parse_is_deterministic() {
        let options = AnalyzerOptions::default();
        let text = "pay rent every month, next friday";
        assert_eq!(
            parse_natural_language(text, now(), &options),
            parse_natural_language(text, now(), &options)
        );
    }

    #[test]
    fn due_date_feeds_priority_fallback() {
        let info =
            parse_natural_language("water plants next week", now(), &AnalyzerOptions::default());
        assert_eq!(info.priority, Priority::Medium);
        assert_eq!(info.category, Category::Default);
    }

    #[test]
    fn profanity_filter_can_be_disabled() {
        let options = AnalyzerOptions {
            filter_profanity: false,
            ..AnalyzerOptions::default()
        };
        let info = parse_natural_language("damn taxes", now(), &options);
        assert_eq!(info.text, "Damn Taxes");
    }

    #[test]
    fn short_text_gives_no_suggestions() {
        let analyzer = Analyzer::default();
        assert!(analyzer.analyze("", now()).is_none());
        assert!(analyzer.analyze("ab", now()).is_none());
        assert!(analyzer.analyze(" a  b \n", now()).is_none());
        assert!(analyzer.analyze(" a b c ", now()).is_some());
    }

    #[test]
    fn analyze_returns_info_and_suggestions() {
        let analyzer = Analyzer::default();
        let analysis = analyzer
            .analyze("Steps: buy milk, walk dog, call mom", now())
            .expect("analysis");
        assert_eq!(analysis.info.category, Category::Shopping);
        let texts: Vec<&str> = analysis.suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(&texts[..3], &["Buy milk", "Walk dog", "Call mom"]);
        assert!(analysis.suggestions.len() <= 7);
        assert_matches!(analysis.suggestions[0].source, SuggestionSource::Explicit);
    }

    #[test]
    fn analysis_serializes_with_camel_case_info() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze("gym every morning", now()).expect("analysis");
        let json = serde_json::to_value(&analysis).expect("json");
        assert_eq!(json["info"]["timeOfDay"], "morning");
        assert_eq!(json["info"]["recurring"], "daily");
        assert_eq!(json["info"]["category"], "health");
        assert!(json["info"]["dueDate"].is_null());
    }

    #[test]
    fn clean_respects_whitespace_option() {
        let keep = Analyzer::new(AnalyzerOptions {
            cleanup: CleanupOptions {
                collapse_whitespace: false,
            },
            ..AnalyzerOptions::default()
        });
        assert_eq!(keep.clean("uh  buy  milk!"), "  buy  milk");
        assert_eq!(Analyzer::default().clean("uh  buy  milk!"), "buy milk");
    }
}
