use crate::model::Task;
use crate::storage::{KeyValueStore, persistence};
use crate::templates::{FooterTemplate, ItemTemplate};
use crate::view::{
    Filter, HighlightTier, active_todos, filtered_todos, footer_summary,
    recent_completion_highlights,
};
use serde::Serialize;

/// Class applied to the most recently created item while the `all` filter is
/// active.
pub const ENTERING_CLASS: &str = "fading";

pub fn tier_color(tier: HighlightTier) -> &'static str {
    match tier {
        HighlightTier::Oldest => "yellow",
        HighlightTier::Middle => "magenta",
        HighlightTier::Newest => "green",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    Entering,
    Highlight {
        tier: HighlightTier,
        color: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    NewTodo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedItem {
    pub id: String,
    pub markup: String,
    pub decorations: Vec<Decoration>,
}

impl RenderedItem {
    pub fn highlight(&self) -> Option<HighlightTier> {
        self.decorations.iter().find_map(|decoration| match decoration {
            Decoration::Highlight { tier, .. } => Some(*tier),
            Decoration::Entering => None,
        })
    }

    pub fn is_entering(&self) -> bool {
        self.decorations.contains(&Decoration::Entering)
    }
}

/// Everything the display needs after one state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub filter: Filter,
    pub items: Vec<RenderedItem>,
    pub main_visible: bool,
    pub toggle_all_checked: bool,
    /// `None` hides the footer, which happens when the list is empty.
    pub footer: Option<String>,
    pub focus: Focus,
}

/// Turns the task list into a [`Frame`] and writes the list back to storage.
pub struct RenderCoordinator {
    item_template: Box<dyn ItemTemplate>,
    footer_template: Box<dyn FooterTemplate>,
    store: Box<dyn KeyValueStore>,
    namespace: String,
}

impl RenderCoordinator {
    pub fn new(
        item_template: Box<dyn ItemTemplate>,
        footer_template: Box<dyn FooterTemplate>,
        store: Box<dyn KeyValueStore>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            item_template,
            footer_template,
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        persistence::load(self.store.as_ref(), &self.namespace)
    }

    #[tracing::instrument(skip(self, tasks, editing), fields(count = tasks.len()))]
    pub fn render(&mut self, tasks: &[Task], filter: Filter, editing: Option<&str>) -> Frame {
        let frame = self.compose(tasks, filter, editing);

        if let Err(err) = persistence::save(self.store.as_mut(), &self.namespace, tasks) {
            tracing::warn!(namespace = %self.namespace, error = %err, "failed to persist tasks");
        }

        frame
    }

    /// Builds the frame without touching storage.
    pub fn compose(&self, tasks: &[Task], filter: Filter, editing: Option<&str>) -> Frame {
        let visible = filtered_todos(tasks, filter);
        let markups = self.item_template.render_items(&visible, editing);

        let mut items: Vec<RenderedItem> = visible
            .iter()
            .zip(markups)
            .map(|(task, markup)| RenderedItem {
                id: task.id.clone(),
                markup,
                decorations: Vec::new(),
            })
            .collect();

        if filter == Filter::All
            && let Some(newest) = tasks.last()
            && let Some(item) = items.iter_mut().rev().find(|item| item.id == newest.id)
        {
            item.decorations.push(Decoration::Entering);
        }

        for highlight in recent_completion_highlights(tasks) {
            if let Some(item) = items.iter_mut().find(|item| item.id == highlight.id) {
                item.decorations.push(Decoration::Highlight {
                    tier: highlight.tier,
                    color: tier_color(highlight.tier),
                });
            }
        }

        let footer = if tasks.is_empty() {
            None
        } else {
            Some(
                self.footer_template
                    .render_footer(&footer_summary(tasks, filter)),
            )
        };

        Frame {
            filter,
            main_visible: !items.is_empty(),
            items,
            toggle_all_checked: active_todos(tasks).is_empty(),
            footer,
            focus: Focus::NewTodo,
        }
    }
}
