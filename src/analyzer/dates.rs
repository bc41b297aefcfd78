use once_cell::sync::Lazy;
use regex::Regex;
use time::{util::days_in_year_month, Date, Duration, OffsetDateTime, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DueRule {
    Today,
    Tomorrow,
    NextWeek,
    NextWeekday(Weekday),
    ThisWeekend,
    NextMonth,
}

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sunday),
    ("monday", Weekday::Monday),
    ("tuesday", Weekday::Tuesday),
    ("wednesday", Weekday::Wednesday),
    ("thursday", Weekday::Thursday),
    ("friday", Weekday::Friday),
    ("saturday", Weekday::Saturday),
];

// Table order is the tie-break: earlier rules win when several phrases occur.
static DUE_RULES: Lazy<Vec<(Regex, DueRule)>> = Lazy::new(|| {
    let mut rules = vec![
        (r"\btoday\b", DueRule::Today),
        (r"\btomorrow\b", DueRule::Tomorrow),
        (r"\bnext\s+week\b", DueRule::NextWeek),
    ]
    .into_iter()
    .map(|(pattern, rule)| (pattern.to_string(), rule))
    .collect::<Vec<_>>();
    for (name, weekday) in WEEKDAYS {
        rules.push((format!(r"\bnext\s+{name}\b"), DueRule::NextWeekday(weekday)));
    }
    rules.push((r"\bthis\s+weekend\b".to_string(), DueRule::ThisWeekend));
    rules.push((r"\bnext\s+month\b".to_string(), DueRule::NextMonth));

    rules
        .into_iter()
        .map(|(pattern, rule)| {
            let regex = Regex::new(&pattern).expect("valid due date pattern");
            (regex, rule)
        })
        .collect()
});

/// Finds the first due-date phrase in `text` and resolves it against `now`.
///
/// Resolved dates keep the time of day and offset of `now`.
pub fn extract_due_date(text: &str, now: OffsetDateTime) -> Option<OffsetDateTime> {
    let lowered = text.to_lowercase();
    let rule = DUE_RULES
        .iter()
        .find(|(regex, _)| regex.is_match(&lowered))
        .map(|(_, rule)| *rule)?;
    tracing::trace!(?rule, "due date phrase matched");

    match rule {
        DueRule::Today => Some(now),
        DueRule::Tomorrow => now.checked_add(Duration::days(1)),
        DueRule::NextWeek => now.checked_add(Duration::days(7)),
        DueRule::NextWeekday(weekday) => next_day_of_week(now, weekday),
        DueRule::ThisWeekend => next_day_of_week(now, Weekday::Saturday),
        DueRule::NextMonth => {
            let date = same_day_next_month(now.date())?;
            Some(now.replace_date(date))
        }
    }
}

/// Next occurrence of `target` counting `from` itself: if `from` already
/// falls on `target`, `from` is returned unchanged.
pub fn next_day_of_week(from: OffsetDateTime, target: Weekday) -> Option<OffsetDateTime> {
    let current = i64::from(from.weekday().number_days_from_sunday());
    let wanted = i64::from(target.number_days_from_sunday());
    let offset = (7 + wanted - current) % 7;
    from.checked_add(Duration::days(offset))
}

/// Same day of month one month later, clamped to the last day of that month.
fn same_day_next_month(date: Date) -> Option<Date> {
    let month = date.month().next();
    let year = if month == time::Month::January {
        date.year().checked_add(1)?
    } else {
        date.year()
    };
    let day = date.day().min(days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

/// Whole calendar days from `now` to `due`, negative when `due` is in the past.
pub fn days_until(now: OffsetDateTime, due: OffsetDateTime) -> i64 {
    let due = due.to_offset(now.offset());
    (due.date() - now.date()).whole_days()
}
