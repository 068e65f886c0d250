use crate::model::Task;
use serde::Serialize;

/// Number of recently completed tasks that receive a highlight.
pub const HIGHLIGHT_DEPTH: usize = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Unrecognised names select [`Filter::All`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Salience of a completion highlight, least to most recent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightTier {
    Oldest,
    Middle,
    Newest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub id: String,
    pub tier: HighlightTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterSummary {
    pub active_count: usize,
    pub completed_count: usize,
    pub filter: Filter,
}

pub fn active_todos(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| !task.completed).collect()
}

pub fn completed_todos(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.completed).collect()
}

pub fn filtered_todos(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    match filter {
        Filter::All => tasks.iter().collect(),
        Filter::Active => active_todos(tasks),
        Filter::Completed => completed_todos(tasks),
    }
}

pub fn filtered_todos_by_name<'a>(tasks: &'a [Task], filter_name: &str) -> Vec<&'a Task> {
    filtered_todos(tasks, Filter::from_name(filter_name))
}

/// The up to three most recently completed tasks, ascending by rank.
///
/// Completed tasks without a rank sort before every ranked one; equal ranks
/// keep list order. The last entry is always [`HighlightTier::Newest`], so a
/// single completed task gets the most salient tier.
pub fn recent_completion_highlights(tasks: &[Task]) -> Vec<Highlight> {
    let mut completed = completed_todos(tasks);
    completed.sort_by_key(|task| task.completion_rank);

    let start = completed.len().saturating_sub(HIGHLIGHT_DEPTH);
    let recent = &completed[start..];
    let tiers = [
        HighlightTier::Oldest,
        HighlightTier::Middle,
        HighlightTier::Newest,
    ];
    let skipped = HIGHLIGHT_DEPTH - recent.len();

    recent
        .iter()
        .zip(&tiers[skipped..])
        .map(|(task, tier)| Highlight {
            id: task.id.clone(),
            tier: *tier,
        })
        .collect()
}

pub fn footer_summary(tasks: &[Task], filter: Filter) -> FooterSummary {
    let active_count = active_todos(tasks).len();
    FooterSummary {
        active_count,
        completed_count: tasks.len() - active_count,
        filter,
    }
}

pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
