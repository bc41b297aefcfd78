use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

const TIME_OF_DAY_KEYWORDS: [(TimeOfDay, &[&str]); 3] = [
    (
        TimeOfDay::Morning,
        &["morning", "breakfast", "sunrise", "before work", "first thing"],
    ),
    (
        TimeOfDay::Afternoon,
        &["afternoon", "lunch", "noon", "midday"],
    ),
    (
        TimeOfDay::Evening,
        &["evening", "tonight", "dinner", "night", "after work", "sunset", "bedtime"],
    ),
];

const RECURRENCE_KEYWORDS: [(Recurrence, &[&str]); 4] = [
    (
        Recurrence::Daily,
        &[
            "every day",
            "everyday",
            "daily",
            "each day",
            "every morning",
            "every night",
            "every evening",
        ],
    ),
    (
        Recurrence::Weekly,
        &[
            "every week",
            "weekly",
            "each week",
            "every monday",
            "every tuesday",
            "every wednesday",
            "every thursday",
            "every friday",
            "every saturday",
            "every sunday",
            "every weekend",
        ],
    ),
    (
        Recurrence::Monthly,
        &["every month", "monthly", "each month"],
    ),
    (
        Recurrence::Yearly,
        &["every year", "yearly", "annually", "annual", "each year"],
    ),
];

fn first_match<T: Copy>(table: &[(T, &[&str])], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(bucket, _)| *bucket)
}

pub fn detect_time_of_day(text: &str) -> Option<TimeOfDay> {
    first_match(&TIME_OF_DAY_KEYWORDS, text)
}

pub fn detect_recurrence(text: &str) -> Option<Recurrence> {
    first_match(&RECURRENCE_KEYWORDS, text)
}
