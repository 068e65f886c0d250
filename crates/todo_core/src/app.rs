use crate::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::model::Task;
use crate::render::{Frame, RenderCoordinator};
use crate::route::filter_from_fragment;
use crate::task_store::TaskStore;
use crate::view::Filter;

/// Every state change the list understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create { title: String },
    ToggleAll { completed: bool },
    ClearCompleted,
    Toggle { id: String },
    StartEdit { id: String },
    CommitEdit { id: String, title: String },
    CancelEdit { id: String },
    Delete { id: String },
    Route { fragment: String },
}

/// Owned application state: the task list, the active filter and the task
/// being edited, if any.
///
/// Each [`TodoApp::dispatch`] runs to completion: mutate, render, persist.
pub struct TodoApp {
    store: TaskStore,
    filter: Filter,
    editing: Option<String>,
    renderer: RenderCoordinator,
}

impl TodoApp {
    /// Loads the persisted list and selects the filter named by `route`.
    pub fn open(renderer: RenderCoordinator, route: &str) -> Self {
        Self::open_with_clock(renderer, route, Box::new(SystemClock))
    }

    pub fn open_with_clock(renderer: RenderCoordinator, route: &str, clock: Box<dyn Clock>) -> Self {
        let tasks = renderer.load_tasks();
        tracing::debug!(count = tasks.len(), route, "opened task list");
        Self {
            store: TaskStore::with_clock(tasks, clock),
            filter: filter_from_fragment(route),
            editing: None,
            renderer,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Tasks in the order the current filter shows them.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        crate::view::filtered_todos(self.store.tasks(), self.filter)
    }

    pub fn dispatch(&mut self, action: Action) -> Frame {
        if let Err(err) = self.apply(action) {
            tracing::error!(error = %err, "action ignored, list left unchanged");
        }
        self.render()
    }

    pub fn render(&mut self) -> Frame {
        self.renderer
            .render(self.store.tasks(), self.filter, self.editing.as_deref())
    }

    fn apply(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::Create { title } => {
                self.store.create(&title)?;
            }
            Action::ToggleAll { completed } => {
                self.store.bulk_toggle(completed)?;
            }
            Action::ClearCompleted => {
                self.store.delete_completed();
                if let Some(id) = self.editing.as_deref()
                    && self.store.get(id).is_none()
                {
                    self.editing = None;
                }
            }
            Action::Toggle { id } => {
                self.store.toggle(&id)?;
            }
            Action::StartEdit { id } => {
                if self.store.get(&id).is_none() {
                    return Err(AppError::not_found(&id));
                }
                self.editing = Some(id);
            }
            Action::CommitEdit { id, title } => {
                if self.editing.as_deref() != Some(id.as_str()) {
                    tracing::debug!(id = %id, "commit for task not in edit mode ignored");
                    return Ok(());
                }
                self.editing = None;
                self.store.edit(&id, &title)?;
            }
            Action::CancelEdit { id } => {
                if self.editing.as_deref() == Some(id.as_str()) {
                    self.editing = None;
                }
            }
            Action::Delete { id } => {
                if self.editing.as_deref() == Some(id.as_str()) {
                    self.editing = None;
                }
                self.store.delete(&id)?;
            }
            Action::Route { fragment } => {
                self.filter = filter_from_fragment(&fragment);
            }
        }
        Ok(())
    }
}
