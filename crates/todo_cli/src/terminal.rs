use tabled::settings::Style;
use tabled::{Table, Tabled};
use todo_core::config::Palette;
use todo_core::model::Task;
use todo_core::render::Frame;
use todo_core::templates::{FooterTemplate, ItemTemplate};
use todo_core::view::{Filter, FooterSummary, HighlightTier, pluralize};

/// Plain-text list and footer templates for the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTemplates;

impl ItemTemplate for TerminalTemplates {
    fn render_items(&self, todos: &[&Task], editing: Option<&str>) -> Vec<String> {
        todos
            .iter()
            .map(|task| {
                let check = if task.completed { "[x]" } else { "[ ]" };
                if editing == Some(task.id.as_str()) {
                    format!("{check} {} (editing)", task.title)
                } else {
                    format!("{check} {}", task.title)
                }
            })
            .collect()
    }
}

impl FooterTemplate for TerminalTemplates {
    fn render_footer(&self, summary: &FooterSummary) -> String {
        let filters = [Filter::All, Filter::Active, Filter::Completed]
            .into_iter()
            .map(|filter| {
                if filter == summary.filter {
                    format!("[{}]", filter.as_str())
                } else {
                    filter.as_str().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut footer = format!(
            "{} {} left | {}",
            summary.active_count,
            pluralize(summary.active_count, "item"),
            filters
        );
        if summary.completed_count > 0 {
            footer.push_str(&format!(
                " | clear-completed ({})",
                summary.completed_count
            ));
        }
        footer
    }
}

pub fn tier_label(tier: HighlightTier) -> &'static str {
    match tier {
        HighlightTier::Oldest => "3rd latest",
        HighlightTier::Middle => "2nd latest",
        HighlightTier::Newest => "latest",
    }
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "task")]
    markup: String,
    created: String,
    completed: String,
    marker: String,
    id: String,
}

/// Lays a frame out as a table followed by the footer line.
pub fn render_frame(frame: &Frame, tasks: &[Task], palette: &Palette) -> String {
    if !frame.main_visible {
        let mut output = format!("No {} tasks.", frame.filter.as_str());
        if let Some(footer) = frame.footer.as_deref() {
            output.push('\n');
            output.push_str(&palette.mutedize(footer));
        }
        return output;
    }

    let rows = frame.items.iter().enumerate().map(|(index, item)| {
        let task = tasks.iter().find(|task| task.id == item.id);
        let mut markers = Vec::new();
        if item.is_entering() {
            markers.push("new".to_string());
        }
        let mut markup = item.markup.clone();
        if let Some(tier) = item.highlight() {
            markers.push(tier_label(tier).to_string());
            markup = palette.highlight(tier, &markup);
        } else if item.is_entering() {
            markup = palette.enteringize(&markup);
        }

        Row {
            position: index + 1,
            markup,
            created: task
                .map(|task| format!("{} {}", task.creation_date, task.creation_time))
                .unwrap_or_default(),
            completed: task
                .and_then(|task| {
                    task.completion_date
                        .as_ref()
                        .zip(task.completion_time.as_ref())
                        .map(|(date, time)| format!("{date} {time}"))
                })
                .unwrap_or_else(|| "-".to_string()),
            marker: markers.join(", "),
            id: item.id.clone(),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    let mut output = table.to_string();

    if frame.toggle_all_checked {
        output.push_str("\nAll tasks completed.");
    }
    if let Some(footer) = frame.footer.as_deref() {
        output.push('\n');
        output.push_str(&palette.mutedize(footer));
    }
    output
}

pub fn render_task_details(task: &Task) -> String {
    let status = if task.completed { "completed" } else { "active" };
    let completed = match (&task.completion_date, &task.completion_time) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        _ => "-".to_string(),
    };
    format!(
        "id: {}\ntitle: {}\nstatus: {}\ncreated: {} {}\ncompleted: {}",
        task.id, task.title, status, task.creation_date, task.creation_time, completed
    )
}

#[cfg(test)]
mod tests {
    use super::{TerminalTemplates, render_frame, render_task_details};
    use todo_core::config::palette_for_theme;
    use todo_core::model::Task;
    use todo_core::render::RenderCoordinator;
    use todo_core::storage::MemoryStore;
    use todo_core::templates::{FooterTemplate, ItemTemplate};
    use todo_core::view::{Filter, FooterSummary};

    fn task(id: &str, title: &str, rank: Option<u64>) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            completed: rank.is_some(),
            completion_rank: rank,
            creation_date: "October 15, 2026".to_string(),
            creation_time: "09:00 am".to_string(),
            completion_date: rank.map(|_| "October 15, 2026".to_string()),
            completion_time: rank.map(|_| "09:45 am".to_string()),
        }
    }

    fn coordinator() -> RenderCoordinator {
        RenderCoordinator::new(
            Box::new(TerminalTemplates),
            Box::new(TerminalTemplates),
            Box::new(MemoryStore::new()),
            "todos",
        )
    }

    #[test]
    fn items_show_check_state_and_edit_mode() {
        let a = task("a", "milk", None);
        let b = task("b", "bread", Some(1));

        let rendered = TerminalTemplates.render_items(&[&a, &b], Some("b"));
        assert_eq!(rendered, vec!["[ ] milk", "[x] bread (editing)"]);
    }

    #[test]
    fn footer_brackets_selected_filter() {
        let footer = TerminalTemplates.render_footer(&FooterSummary {
            active_count: 1,
            completed_count: 2,
            filter: Filter::Active,
        });

        assert_eq!(
            footer,
            "1 item left | all [active] completed | clear-completed (2)"
        );
    }

    #[test]
    fn frame_table_lists_markers() {
        let tasks = vec![
            task("a", "milk", Some(5)),
            task("b", "bread", None),
        ];
        let frame = coordinator().compose(&tasks, Filter::All, None);

        let output = render_frame(&frame, &tasks, &palette_for_theme(None));

        assert!(output.contains("[x] milk"));
        assert!(output.contains("latest"));
        assert!(output.contains("new"));
        assert!(output.contains("October 15, 2026 09:45 am"));
        assert!(output.contains("1 item left"));
    }

    #[test]
    fn empty_view_reports_filter() {
        let tasks = vec![task("a", "milk", None)];
        let frame = coordinator().compose(&tasks, Filter::Completed, None);

        let output = render_frame(&frame, &tasks, &palette_for_theme(None));
        assert!(output.starts_with("No completed tasks."));
    }

    #[test]
    fn task_details_show_completion() {
        let details = render_task_details(&task("a", "milk", Some(3)));
        assert!(details.contains("status: completed"));
        assert!(details.contains("completed: October 15, 2026 09:45 am"));

        let details = render_task_details(&task("b", "bread", None));
        assert!(details.contains("status: active"));
        assert!(details.contains("completed: -"));
    }
}
