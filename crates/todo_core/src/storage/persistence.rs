use crate::error::AppError;
use crate::model::Task;
use crate::storage::KeyValueStore;
use std::collections::HashSet;

pub const DEFAULT_NAMESPACE: &str = "todos";

/// Reads the task list stored under `namespace`.
///
/// Anything that is not a well-formed list comes back empty: a missing key, a
/// store read failure, invalid JSON, or a list with repeated ids.
#[tracing::instrument(skip(store))]
pub fn load(store: &dyn KeyValueStore, namespace: &str) -> Vec<Task> {
    let raw = match store.get_item(namespace) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed reading stored tasks");
            return Vec::new();
        }
    };

    match decode(&raw) {
        Ok(tasks) => {
            tracing::debug!(count = tasks.len(), "loaded tasks");
            tasks
        }
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed stored tasks");
            Vec::new()
        }
    }
}

/// Replaces whatever was stored under `namespace` with `tasks`.
#[tracing::instrument(skip(store, tasks), fields(count = tasks.len()))]
pub fn save(store: &mut dyn KeyValueStore, namespace: &str, tasks: &[Task]) -> Result<(), AppError> {
    let encoded = encode(tasks)?;
    store.set_item(namespace, &encoded)
}

pub fn encode(tasks: &[Task]) -> Result<String, AppError> {
    serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn decode(raw: &str) -> Result<Vec<Task>, AppError> {
    let tasks: Vec<Task> =
        serde_json::from_str(raw).map_err(|err| AppError::invalid_data(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(AppError::invalid_data(format!("duplicate id {}", task.id)));
        }
    }

    Ok(tasks)
}
