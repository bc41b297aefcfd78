use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const PROFANITY: &[&str] = &[
    "damn",
    "dammit",
    "goddamn",
    "crap",
    "crappy",
    "hell",
    "shit",
    "shitty",
    "bullshit",
    "fuck",
    "fucking",
    "fucked",
    "bloody",
    "bastard",
    "bitch",
    "ass",
    "asshole",
    "piss",
    "pissed",
    "wtf",
];

const FILLER_WORDS: &[&str] = &[
    "um",
    "umm",
    "uh",
    "uhh",
    "er",
    "erm",
    "hmm",
    "basically",
    "actually",
    "literally",
    "totally",
    "kinda",
    "sorta",
    "you know",
    "i mean",
    "like totally",
];

static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[!@#$%^&*()_+=\[\]{}|\\:;"<>,.?/~`]"#).expect("valid special character pattern")
});

static BANNED_WORDS: Lazy<Regex> = Lazy::new(|| {
    let mut words: Vec<&str> = PROFANITY.iter().chain(FILLER_WORDS).copied().collect();
    // Longer phrases first so "like totally" wins over any shorter overlap.
    words.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = words
        .into_iter()
        .map(|word| {
            word.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
        .expect("valid banned word pattern")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Controls the whitespace handling of [`filter_profanity_and_filler_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupOptions {
    /// Collapse whitespace runs left behind by removed words and trim the ends.
    pub collapse_whitespace: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
        }
    }
}

/// Strips punctuation, keeping letters, digits, whitespace, hyphens and apostrophes.
pub fn filter_special_characters(input: &str) -> String {
    SPECIAL_CHARS.replace_all(input, "").into_owned()
}

/// Lower-cases `input` and removes whole-word profanity and filler words.
///
/// Removal is repeated until the text stops changing, so the function is
/// idempotent even when taking out one word brings two halves of a filler
/// phrase together ("you um know").
pub fn filter_profanity_and_filler_words(input: &str, options: CleanupOptions) -> String {
    let mut text = input.to_lowercase();
    loop {
        let next = BANNED_WORDS.replace_all(&text, "");
        if next == text {
            break;
        }
        text = next.into_owned();
    }

    if options.collapse_whitespace {
        WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
    } else {
        text
    }
}

/// Lower-cases the text and upper-cases the first character of every
/// space-separated token. Spacing is preserved exactly.
pub fn capitalize_words(input: &str) -> String {
    input
        .to_lowercase()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first grapheme of `input`, leaving the rest untouched.
pub fn capitalize_first(input: &str) -> String {
    let mut graphemes = input.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapse() -> CleanupOptions {
        CleanupOptions::default()
    }

    fn keep() -> CleanupOptions {
        CleanupOptions {
            collapse_whitespace: false,
        }
    }

    #[test]
    fn special_characters_are_removed_in_place() {
        let input = "Buy milk!!! (2%) @store; don't-forget";
        let output = filter_special_characters(input);
        assert_eq!(output, "Buy milk 2 store don't-forget");
        assert!(output.len() <= input.len());
    }

    #[test]
    fn special_characters_keep_plain_text_untouched() {
        assert_eq!(filter_special_characters("call mom at 5"), "call mom at 5");
        assert_eq!(filter_special_characters(""), "");
    }

    #[test]
    fn filler_words_removed_and_whitespace_collapsed() {
        let output =
            filter_profanity_and_filler_words("Um  call the DAMN dentist  basically", collapse());
        assert_eq!(output, "call the dentist");
    }

    #[test]
    fn filler_words_removed_with_whitespace_preserved() {
        let output = filter_profanity_and_filler_words("um call  mom", keep());
        assert_eq!(output, " call  mom");
    }

    #[test]
    fn partial_words_are_never_removed() {
        let output =
            filter_profanity_and_filler_words("hello assistant, classic umbrella", collapse());
        assert_eq!(output, "hello assistant, classic umbrella");
    }

    #[test]
    fn multi_word_fillers_match_any_spacing() {
        let output = filter_profanity_and_filler_words("book flights you   know", collapse());
        assert_eq!(output, "book flights");
    }

    #[test]
    fn filtering_is_idempotent() {
        let samples = [
            "Um, you um know what, call the shitty plumber",
            "   literally   just   do it  ",
            "i mean i mean buy eggs",
            "",
            "nothing to remove here",
        ];
        for sample in samples {
            for options in [collapse(), keep()] {
                let once = filter_profanity_and_filler_words(sample, options);
                let twice = filter_profanity_and_filler_words(&once, options);
                assert_eq!(once, twice, "not idempotent for {sample:?}");
            }
        }
    }

    #[test]
    fn capitalize_words_title_cases_each_token() {
        assert_eq!(capitalize_words("bUY MILK tomorrow"), "Buy Milk Tomorrow");
        assert_eq!(capitalize_words("two  spaces"), "Two  Spaces");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn capitalize_words_is_idempotent() {
        for sample in ["hello world", "ALL CAPS", "mIxEd cAsE words", "a b c"] {
            let once = capitalize_words(sample);
            assert_eq!(capitalize_words(&once), once);
        }
    }

    #[test]
    fn capitalize_first_only_touches_leading_grapheme() {
        assert_eq!(capitalize_first("walk the dog"), "Walk the dog");
        assert_eq!(capitalize_first("éclair run"), "Éclair run");
        assert_eq!(capitalize_first(""), "");
    }
}
