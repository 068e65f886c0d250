use serde::{Deserialize, Serialize};

/// A single to-do item as stored under the namespace key.
///
/// The three completion fields are either all present (the task is
/// completed) or all `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Ordering marker taken when the task was last completed.
    #[serde(default)]
    pub completion_rank: Option<u64>,
    pub creation_date: String,
    pub creation_time: String,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub completion_time: Option<String>,
}

impl Task {
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
