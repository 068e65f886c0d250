use crate::clock::{Clock, Stamp, SystemClock, stamp, unix_millis};
use crate::error::AppError;
use crate::id::new_id;
use crate::model::Task;
use time::OffsetDateTime;

/// Result of [`TaskStore::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Renamed(Task),
    /// The trimmed title was empty, so the task was removed instead.
    Deleted(Task),
}

/// Exclusive owner of the ordered task list.
///
/// Insertion order is creation order and is never rearranged; deletions
/// remove in place. Completion ranks handed out by one store are strictly
/// increasing and always above any rank that was present when it was built.
pub struct TaskStore {
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,
    last_rank: u64,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("last_rank", &self.last_rank)
            .finish_non_exhaustive()
    }
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self::with_clock(tasks, Box::new(SystemClock))
    }

    pub fn with_clock(tasks: Vec<Task>, clock: Box<dyn Clock>) -> Self {
        let last_rank = tasks
            .iter()
            .filter_map(|task| task.completion_rank)
            .max()
            .unwrap_or(0);
        Self {
            tasks,
            clock,
            last_rank,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a new active task. A title that is blank after trimming is
    /// ignored and `Ok(None)` is returned.
    pub fn create(&mut self, title: &str) -> Result<Option<&Task>, AppError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let created = stamp(self.clock.now())?;
        let mut id = new_id();
        while self.get(&id).is_some() {
            id = new_id();
        }

        tracing::debug!(id = %id, "creating task");
        self.tasks.push(Task {
            id,
            title: trimmed.to_string(),
            completed: false,
            completion_rank: None,
            creation_date: created.date,
            creation_time: created.time,
            completion_date: None,
            completion_time: None,
        });

        Ok(self.tasks.last())
    }

    pub fn toggle(&mut self, id: &str) -> Result<&Task, AppError> {
        let index = self.index_of(id)?;
        let now = self.clock.now();
        let completed = !self.tasks[index].completed;
        let completion = if completed {
            Some(self.completion_marker(now)?)
        } else {
            None
        };

        let task = &mut self.tasks[index];
        apply_completion(task, completion);
        tracing::debug!(id = %task.id, completed = task.completed, rank = ?task.completion_rank, "toggled task");
        Ok(&*task)
    }

    /// Sets every task to `completed`, returning how many actually changed.
    pub fn bulk_toggle(&mut self, completed: bool) -> Result<usize, AppError> {
        let now = self.clock.now();
        let completion_stamp = if completed { Some(stamp(now)?) } else { None };

        let mut changed = 0;
        for index in 0..self.tasks.len() {
            if self.tasks[index].completed == completed {
                continue;
            }

            let completion = match completion_stamp.as_ref() {
                Some(stamp) => Some((self.next_rank(now), stamp.clone())),
                None => None,
            };
            apply_completion(&mut self.tasks[index], completion);
            changed += 1;
        }

        tracing::debug!(completed, changed, "bulk toggled tasks");
        Ok(changed)
    }

    /// Replaces the title of `id`, or deletes the task when the trimmed
    /// title is empty.
    pub fn edit(&mut self, id: &str, new_title: &str) -> Result<EditOutcome, AppError> {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return self.delete(id).map(EditOutcome::Deleted);
        }

        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        task.title = trimmed.to_string();
        tracing::debug!(id = %task.id, "renamed task");
        Ok(EditOutcome::Renamed(task.clone()))
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);
        tracing::debug!(id = %removed.id, "deleted task");
        Ok(removed)
    }

    /// Removes every completed task, returning how many were removed.
    pub fn delete_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        let removed = before - self.tasks.len();
        tracing::debug!(removed, "deleted completed tasks");
        removed
    }

    fn index_of(&self, id: &str) -> Result<usize, AppError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::not_found(id))
    }

    fn completion_marker(&mut self, now: OffsetDateTime) -> Result<(u64, Stamp), AppError> {
        let stamp = stamp(now)?;
        Ok((self.next_rank(now), stamp))
    }

    fn next_rank(&mut self, now: OffsetDateTime) -> u64 {
        let rank = unix_millis(now).max(self.last_rank.saturating_add(1));
        self.last_rank = rank;
        rank
    }
}

fn apply_completion(task: &mut Task, completion: Option<(u64, Stamp)>) {
    match completion {
        Some((rank, stamp)) => {
            task.completed = true;
            task.completion_rank = Some(rank);
            task.completion_date = Some(stamp.date);
            task.completion_time = Some(stamp.time);
        }
        None => {
            task.completed = false;
            task.completion_rank = None;
            task.completion_date = None;
            task.completion_time = None;
        }
    }
}
