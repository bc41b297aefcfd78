use std::cmp::{max, min};

use time::format_description;
use time::{Date, Duration};

use crate::analyzer::{Category, Priority};
use crate::tasks::{Task, TaskStatusFilter};

#[derive(Debug, Clone, Default)]
pub struct RangeFilter {
    pub from: Option<Date>,
    pub to: Option<Date>, // exclusive
}

impl RangeFilter {
    pub fn has_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn merge(&mut self, other: RangeFilter) {
        if let Some(from) = other.from {
            self.from = Some(match self.from {
                Some(existing) => max(existing, from),
                None => from,
            });
        }
        if let Some(to) = other.to {
            self.to = Some(match self.to {
                Some(existing) => min(existing, to),
                None => to,
            });
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date < to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub terms: Vec<String>,
    pub priorities: Vec<Priority>,
    pub categories: Vec<Category>,
    pub status: TaskStatusFilter,
    pub due: RangeFilter,
    pub without_due: bool,
}

impl TaskQuery {
    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    pub fn has_filters(&self) -> bool {
        !self.priorities.is_empty()
            || !self.categories.is_empty()
            || self.status != TaskStatusFilter::All
            || self.due.has_range()
            || self.without_due
    }

    /// All terms must appear somewhere in the task; filters are ANDed.
    pub fn matches(&self, task: &Task, today: Date) -> bool {
        if !self.status.matches(task) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&task.category) {
            return false;
        }

        let due = task.due_date(today);
        if self.without_due && due.is_some() {
            return false;
        }
        if self.due.has_range() && !due.is_some_and(|date| self.due.contains(date)) {
            return false;
        }

        let haystack = searchable_text(task);
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

fn searchable_text(task: &Task) -> String {
    let mut text = task.text.to_lowercase();
    if let Some(note) = &task.note {
        text.push('\n');
        text.push_str(&note.to_lowercase());
    }
    for subtask in &task.subtasks {
        text.push('\n');
        text.push_str(&subtask.text.to_lowercase());
    }
    text
}

pub fn parse_query(input: &str) -> TaskQuery {
    let mut query = TaskQuery::default();
    for raw in input.split_whitespace() {
        if let Some(value) = raw.strip_prefix("priority:") {
            match value.parse::<Priority>() {
                Ok(priority) => query.priorities.push(priority),
                Err(_) => tracing::debug!(value, "ignoring unknown priority filter"),
            }
            continue;
        }
        if let Some(value) = raw.strip_prefix("category:") {
            match value.parse::<Category>() {
                Ok(category) => query.categories.push(category),
                Err(_) => tracing::debug!(value, "ignoring unknown category filter"),
            }
            continue;
        }
        if let Some(value) = raw.strip_prefix("is:") {
            match value.parse::<TaskStatusFilter>() {
                Ok(status) => query.status = status,
                Err(_) => tracing::debug!(value, "ignoring unknown status filter"),
            }
            continue;
        }
        if let Some(range) = raw.strip_prefix("due:") {
            if range.eq_ignore_ascii_case("none") {
                query.without_due = true;
            } else {
                query.due.merge(parse_date_range(range));
            }
            continue;
        }
        if let Some(value) = sanitize_term(raw) {
            query.terms.push(value.to_lowercase());
        }
    }
    query
}

fn sanitize_term(raw: &str) -> Option<String> {
    let term: String = raw
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_' | '\''))
        .collect();
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}

fn parse_date_range(spec: &str) -> RangeFilter {
    let mut range = RangeFilter::default();
    let parts: Vec<&str> = spec.split("..").collect();
    match parts.as_slice() {
        [single] => {
            if let Some((from, to)) = parse_single_date(single) {
                range.from = Some(from);
                range.to = Some(to);
            }
        }
        [from, to] => {
            if !from.is_empty() {
                if let Some((start, _)) = parse_single_date(from) {
                    range.from = Some(start);
                }
            }
            if !to.is_empty() {
                if let Some((_, end)) = parse_single_date(to) {
                    range.to = Some(end);
                }
            }
        }
        _ => {}
    }
    range
}

/// Parses `YYYY-MM-DD` into a half-open one-day range.
pub fn parse_single_date(input: &str) -> Option<(Date, Date)> {
    static FORMAT: once_cell::sync::Lazy<Vec<format_description::FormatItem<'static>>> =
        once_cell::sync::Lazy::new(|| {
            format_description::parse("[year]-[month]-[day]")
                .expect("valid date format description")
        });
    let date = Date::parse(input, &*FORMAT).ok()?;
    let next = date.checked_add(Duration::days(1))?;
    Some((date, next))
}
