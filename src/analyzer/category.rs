use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    Finance,
    Social,
    Home,
    #[default]
    Default,
}

// Declaration order resolves overlaps between categories.
const CATEGORY_KEYWORDS: [(Category, &[&str]); 7] = [
    (
        Category::Work,
        &[
            "meeting",
            "report",
            "project",
            "presentation",
            "client",
            "office",
            "email",
            "boss",
            "colleague",
            "deadline",
            "interview",
            "at work",
            "for work",
            "work on",
            "workplace",
        ],
    ),
    (
        Category::Personal,
        &[
            "personal",
            "birthday",
            "anniversary",
            "hobby",
            "journal",
            "diary",
            "read a book",
            "meditate",
            "myself",
        ],
    ),
    (
        Category::Shopping,
        &[
            "buy",
            "shop",
            "grocery",
            "groceries",
            "purchase",
            "order",
            "store",
            "mall",
            "supermarket",
        ],
    ),
    (
        Category::Health,
        &[
            "doctor",
            "dentist",
            "gym",
            "workout",
            "exercise",
            "medicine",
            "pharmacy",
            "appointment",
            "health",
            "therapy",
            "go running",
            "go for a run",
            "morning run",
            "yoga",
        ],
    ),
    (
        Category::Finance,
        &[
            "pay",
            "bill",
            "bank",
            "budget",
            "tax",
            "invoice",
            "rent",
            "loan",
            "insurance",
            "savings",
        ],
    ),
    (
        Category::Social,
        &[
            "party",
            "friend",
            "dinner with",
            "call mom",
            "call dad",
            "visit",
            "wedding",
            "date night",
            "hangout",
            "catch up",
        ],
    ),
    (
        Category::Home,
        &[
            "clean",
            "laundry",
            "dishes",
            "vacuum",
            "repair",
            "fix",
            "garden",
            "cook",
            "tidy",
            "trash",
        ],
    ),
];

/// First category, in declaration order, with a keyword contained in `text`.
pub fn detect_task_category(text: &str) -> Category {
    let lowered = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}
