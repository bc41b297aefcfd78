use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};

use crate::analyzer::{Analysis, Analyzer, CleanupOptions, Priority, SuggestionSource};
use crate::config::OutputFormat;
use crate::search::{parse_query, parse_single_date};
use crate::tasks::{group_by_due, Task};

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDateError {
    #[error("invalid --today value '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Task text. If omitted, reads from stdin.
    #[arg()]
    pub text: Vec<String>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,
    /// Output format (text or json); defaults to the configured format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    /// Text to clean. If omitted, reads from stdin.
    #[arg()]
    pub text: Vec<String>,
    /// Keep whitespace exactly as typed instead of collapsing it
    #[arg(long)]
    pub keep_whitespace: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Task text. If omitted, reads from stdin.
    #[arg()]
    pub text: Vec<String>,
    /// Attach a note to the task
    #[arg(long)]
    pub note: Option<String>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// JSON file holding an array of tasks
    #[arg(long)]
    pub file: PathBuf,
    /// Query terms (supports priority:, category:, is:, due: filters)
    #[arg()]
    pub query: Vec<String>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,
}

pub fn analyze(analyzer: &Analyzer, default_format: OutputFormat, args: AnalyzeArgs) -> Result<()> {
    let text = input_text(&args.text)?;
    let now = reference_now(args.today.as_deref())?;
    let analysis = analyzer.analyze(&text, now);
    let output = match args.format.unwrap_or(default_format) {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&analysis).context("serializing analysis")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => match &analysis {
            Some(analysis) => format_analysis(analysis),
            None => format!(
                "No suggestions yet (type at least {} characters).\n",
                analyzer.options().min_chars
            ),
        },
    };
    print!("{output}");
    Ok(())
}

pub fn clean(analyzer: &Analyzer, args: CleanArgs) -> Result<()> {
    let text = input_text(&args.text)?;
    let cleaned = if args.keep_whitespace {
        let mut options = *analyzer.options();
        options.cleanup = CleanupOptions {
            collapse_whitespace: false,
        };
        Analyzer::new(options).clean(&text)
    } else {
        analyzer.clean(&text)
    };
    println!("{cleaned}");
    Ok(())
}

pub fn new_task(analyzer: &Analyzer, args: NewArgs) -> Result<()> {
    let text = input_text(&args.text)?;
    let now = reference_now(args.today.as_deref())?;
    let task = build_task(analyzer, &text, args.note, now)?;
    let json = serde_json::to_string_pretty(&task).context("serializing task")?;
    println!("{json}");
    Ok(())
}

fn build_task(
    analyzer: &Analyzer,
    text: &str,
    note: Option<String>,
    now: OffsetDateTime,
) -> Result<Task> {
    let Some(analysis) = analyzer.analyze(text, now) else {
        bail!(
            "task text needs at least {} non-whitespace characters",
            analyzer.options().min_chars
        );
    };
    let mut task = Task::from_analysis(&analysis, now);
    task.note = note
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty());
    Ok(task)
}

pub fn list_tasks(args: ListArgs) -> Result<()> {
    let today = reference_now(args.today.as_deref())?.date();
    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("reading task list {}", args.file.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing task list {}", args.file.display()))?;
    print!("{}", run_list(&tasks, &args.query.join(" "), today));
    Ok(())
}

fn run_list(tasks: &[Task], query: &str, today: Date) -> String {
    let query = parse_query(query.trim());
    let narrowed = query.has_terms() || query.has_filters();
    let matching: Vec<&Task> = tasks
        .iter()
        .filter(|task| query.matches(task, today))
        .collect();
    tracing::debug!(
        total = tasks.len(),
        matching = matching.len(),
        narrowed,
        "task list filtered"
    );

    let groups = group_by_due(matching, today);
    if groups.is_empty() {
        let empty = if narrowed { "No matching tasks." } else { "No tasks." };
        return format!("{empty}\n");
    }
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(&mut out, "{} ({})", group.bucket, group.tasks.len());
        for task in group.tasks {
            let mark = if task.completed { "x" } else { " " };
            let mut line = format!("  [{mark}] {}", task.text);
            if task.priority != Priority::None {
                let _ = write!(&mut line, "  !{}", task.priority);
            }
            if let Some(date) = task.due_date(today) {
                let _ = write!(&mut line, "  due {date}");
            }
            let (done, total) = task.progress();
            if total > 0 {
                let _ = write!(&mut line, "  ({done}/{total})");
            }
            let _ = writeln!(&mut out, "{line}");
        }
        out.push('\n');
    }
    out
}

fn format_analysis(analysis: &Analysis) -> String {
    let info = &analysis.info;
    let mut out = String::new();
    let _ = writeln!(&mut out, "text        {}", info.text);
    if let Some(due) = info.due_date {
        let _ = writeln!(&mut out, "due         {}", format_timestamp(due));
    }
    let _ = writeln!(&mut out, "priority    {}", info.priority);
    let _ = writeln!(&mut out, "category    {}", info.category);
    if let Some(time_of_day) = info.time_of_day {
        let _ = writeln!(&mut out, "time        {time_of_day}");
    }
    if let Some(recurring) = info.recurring {
        let _ = writeln!(&mut out, "repeats     {recurring}");
    }
    if !info.subtasks.is_empty() {
        let _ = writeln!(&mut out, "template");
        for subtask in &info.subtasks {
            let _ = writeln!(&mut out, "    - {subtask}");
        }
    }
    if !analysis.suggestions.is_empty() {
        let _ = writeln!(&mut out, "suggested");
        for suggestion in &analysis.suggestions {
            let origin = match suggestion.source {
                SuggestionSource::Explicit => "explicit".to_string(),
                SuggestionSource::Segment(segment) => segment.to_string(),
            };
            let _ = writeln!(&mut out, "    - {}  [{origin}]", suggestion.text);
        }
    }
    out
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.date().to_string())
}

/// The instant the analyzer resolves relative dates against: local now, or
/// the same wall-clock time on `--today` when given.
pub fn reference_now(today: Option<&str>) -> Result<OffsetDateTime, ReferenceDateError> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    match today {
        None => Ok(now),
        Some(raw) => {
            let (date, _) = parse_single_date(raw.trim())
                .ok_or_else(|| ReferenceDateError::Invalid(raw.to_string()))?;
            Ok(now.replace_date(date))
        }
    }
}

fn input_text(args: &[String]) -> Result<String> {
    let joined = args.join(" ");
    if !joined.trim().is_empty() {
        return Ok(joined);
    }
    match read_stdin()? {
        Some(text) if !text.trim().is_empty() => Ok(text.trim_end().to_string()),
        _ => bail!("no task text given (pass it as arguments or pipe it on stdin)"),
    }
}

fn read_stdin() -> Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading task text from stdin")?;
    Ok(Some(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerOptions;
    use crate::tasks::Due;
    use assert_matches::assert_matches;
    use tempfile::TempDir;
    use time::macros::{date, datetime};

    type TestResult<T = ()> = Result<T>;

    fn now() -> OffsetDateTime {
        datetime!(2026-10-18 09:30 UTC)
    }

    #[test]
    fn analysis_text_lists_hints_and_suggestions() {
        let analysis = Analyzer::default()
            .analyze("Steps: buy milk, walk dog tomorrow evening", now())
            .expect("analysis");
        let output = format_analysis(&analysis);

        assert!(output.contains("due         2026-10-19T09:30:00Z"));
        assert!(output.contains("priority    high"));
        assert!(output.contains("category    shopping"));
        assert!(output.contains("time        evening"));
        assert!(output.contains("- Buy milk  [explicit]"));
        assert!(output.contains("[pets]"));
        assert!(!output.contains("repeats"));
    }

    #[test]
    fn build_task_commits_note_and_fields() -> TestResult {
        let task = build_task(
            &Analyzer::default(),
            "pay rent next week",
            Some("  landlord prefers transfer ".into()),
            now(),
        )?;
        assert_eq!(task.text, "Pay Rent Next Week");
        assert_eq!(task.due, Due::Date(date!(2026 - 10 - 25)));
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.note.as_deref(), Some("landlord prefers transfer"));
        Ok(())
    }

    #[test]
    fn build_task_rejects_short_text() {
        let analyzer = Analyzer::new(AnalyzerOptions::default());
        let err = build_task(&analyzer, " a ", None, now()).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn list_groups_and_filters_tasks() -> TestResult {
        let temp = TempDir::new()?;
        let analyzer = Analyzer::default();
        let tasks = vec![
            build_task(&analyzer, "urgent call plumber today", None, now())?,
            build_task(&analyzer, "buy gift for friend", None, now())?,
            build_task(&analyzer, "file report next month", None, now())?,
        ];
        let path = temp.path().join("tasks.json");
        fs::write(&path, serde_json::to_string(&tasks)?)?;
        let loaded: Vec<Task> = serde_json::from_str(&fs::read_to_string(&path)?)?;

        let output = run_list(&loaded, "", date!(2026 - 10 - 18));
        assert!(output.contains("Today (1)"));
        assert!(output.contains("[ ] Urgent Call Plumber Today  !high  due 2026-10-18"));
        assert!(output.contains("Later (1)"));
        assert!(output.contains("No date (1)"));

        let filtered = run_list(&loaded, "category:shopping", date!(2026 - 10 - 18));
        assert!(filtered.contains("Buy Gift For Friend"));
        assert!(!filtered.contains("Plumber"));

        let none = run_list(&loaded, "is:archived", date!(2026 - 10 - 18));
        assert_eq!(none, "No matching tasks.\n");
        Ok(())
    }

    #[test]
    fn empty_list_without_query_says_so() {
        assert_eq!(run_list(&[], "  ", date!(2026 - 10 - 18)), "No tasks.\n");
        assert_eq!(run_list(&[], "milk", date!(2026 - 10 - 18)), "No matching tasks.\n");
    }

    #[test]
    fn reference_date_override() {
        let at = reference_now(Some("2030-01-02")).expect("valid date");
        assert_eq!(at.date(), date!(2030 - 01 - 02));
        assert_matches!(
            reference_now(Some("next tuesday")),
            Err(ReferenceDateError::Invalid(value)) if value == "next tuesday"
        );
    }
}
