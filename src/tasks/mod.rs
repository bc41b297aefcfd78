use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::analyzer::{Analysis, Category, Priority};

/// How far ahead of today the "this week" bucket reaches.
const THIS_WEEK_DAYS: i64 = 7;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "date", rename_all = "lowercase")]
pub enum Due {
    #[default]
    None,
    Today,
    Tomorrow,
    Date(#[serde(with = "calendar_date")] Date),
}

impl Due {
    /// Maps an analyzed due instant onto the relative forms the task list
    /// understands, falling back to a fixed calendar date.
    pub fn from_instant(due: Option<OffsetDateTime>, now: OffsetDateTime) -> Self {
        let Some(due) = due else {
            return Due::None;
        };
        let date = due.to_offset(now.offset()).date();
        if date == now.date() {
            Due::Today
        } else if now.date().next_day() == Some(date) {
            Due::Tomorrow
        } else {
            Due::Date(date)
        }
    }

    /// Resolves relative forms against `today`.
    pub fn resolve(self, today: Date) -> Option<Date> {
        match self {
            Due::None => None,
            Due::Today => Some(today),
            Due::Tomorrow => today.next_day(),
            Due::Date(date) => Some(date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub due: Due,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    pub fn new(text: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            note: None,
            priority: Priority::None,
            category: Category::Default,
            due: Due::None,
            completed: false,
            archived: false,
            subtasks: Vec::new(),
            created_at: now,
        }
    }

    /// Commits analyzer hints into a fresh task. Template subtasks come
    /// first, then suggestion texts not already present.
    pub fn from_analysis(analysis: &Analysis, now: OffsetDateTime) -> Self {
        let info = &analysis.info;
        let mut task = Task::new(info.text.clone(), now);
        task.priority = info.priority;
        task.category = info.category;
        task.due = Due::from_instant(info.due_date, now);

        let mut seen = HashSet::new();
        let texts = info
            .subtasks
            .iter()
            .chain(analysis.suggestions.iter().map(|s| &s.text));
        for text in texts {
            if seen.insert(text.to_lowercase()) {
                task.subtasks.push(Subtask::new(text.clone()));
            }
        }
        task
    }

    /// Flips a subtask's completion flag; returns false for unknown ids.
    pub fn toggle_subtask(&mut self, id: Uuid) -> bool {
        match self.subtasks.iter_mut().find(|subtask| subtask.id == id) {
            Some(subtask) => {
                subtask.completed = !subtask.completed;
                true
            }
            None => false,
        }
    }

    /// `(completed, total)` subtasks.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    pub fn due_date(&self, today: Date) -> Option<Date> {
        self.due.resolve(today)
    }

    pub fn is_active(&self) -> bool {
        !self.completed && !self.archived
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskStatusFilter {
    #[default]
    All,
    Active,
    #[strum(to_string = "done", serialize = "completed")]
    Completed,
    Archived,
}

impl TaskStatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskStatusFilter::All => !task.archived,
            TaskStatusFilter::Active => task.is_active(),
            TaskStatusFilter::Completed => task.completed && !task.archived,
            TaskStatusFilter::Archived => task.archived,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    #[strum(serialize = "This week")]
    ThisWeek,
    Later,
    #[strum(serialize = "No date")]
    NoDate,
}

impl DueBucket {
    pub fn for_date(due: Option<Date>, today: Date) -> Self {
        let Some(due) = due else {
            return DueBucket::NoDate;
        };
        let days = (due - today).whole_days();
        match days {
            d if d < 0 => DueBucket::Overdue,
            0 => DueBucket::Today,
            1 => DueBucket::Tomorrow,
            d if d <= THIS_WEEK_DAYS => DueBucket::ThisWeek,
            _ => DueBucket::Later,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DueGroup<'a> {
    pub bucket: DueBucket,
    pub tasks: Vec<&'a Task>,
}

/// Groups tasks by due bucket, in bucket order, omitting empty buckets.
/// Inside a bucket higher priorities come first, ties keep input order.
pub fn group_by_due<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    today: Date,
) -> Vec<DueGroup<'a>> {
    let mut sorted: Vec<(DueBucket, &Task)> = tasks
        .into_iter()
        .map(|task| (DueBucket::for_date(task.due_date(today), today), task))
        .collect();
    sorted.sort_by(|(a_bucket, a), (b_bucket, b)| {
        a_bucket
            .cmp(b_bucket)
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let mut groups: Vec<DueGroup<'a>> = Vec::new();
    for (bucket, task) in sorted {
        if let Some(group) = groups.last_mut().filter(|group| group.bucket == bucket) {
            group.tasks.push(task);
            continue;
        }
        groups.push(DueGroup {
            bucket,
            tasks: vec![task],
        });
    }
    groups
}
