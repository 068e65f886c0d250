use crate::model::Task;
use crate::view::{Filter, FooterSummary, pluralize};
use std::fmt::Write;

/// Renders a task subsequence, one markup string per task in the same order.
pub trait ItemTemplate {
    fn render_items(&self, todos: &[&Task], editing: Option<&str>) -> Vec<String>;
}

pub trait FooterTemplate {
    fn render_footer(&self, summary: &FooterSummary) -> String;
}

/// TodoMVC style list and footer markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTemplates;

impl ItemTemplate for HtmlTemplates {
    fn render_items(&self, todos: &[&Task], editing: Option<&str>) -> Vec<String> {
        todos
            .iter()
            .map(|task| render_item(task, editing == Some(task.id.as_str())))
            .collect()
    }
}

impl FooterTemplate for HtmlTemplates {
    fn render_footer(&self, summary: &FooterSummary) -> String {
        let mut html = format!(
            "<span class=\"todo-count\"><strong>{}</strong> {} left</span>",
            summary.active_count,
            pluralize(summary.active_count, "item")
        );

        html.push_str("<ul class=\"filters\">");
        for (filter, label) in [
            (Filter::All, "All"),
            (Filter::Active, "Active"),
            (Filter::Completed, "Completed"),
        ] {
            let class = if filter == summary.filter {
                " class=\"selected\""
            } else {
                ""
            };
            let _ = write!(
                html,
                "<li><a{class} href=\"#/{}\">{label}</a></li>",
                filter.as_str()
            );
        }
        html.push_str("</ul>");

        if summary.completed_count > 0 {
            html.push_str("<button class=\"clear-completed\">Clear completed</button>");
        }

        html
    }
}

fn render_item(task: &Task, editing: bool) -> String {
    let mut classes = Vec::new();
    if task.completed {
        classes.push("completed");
    }
    if editing {
        classes.push("editing");
    }
    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    };
    let checked = if task.completed { " checked" } else { "" };
    let title = escape_html(&task.title);

    let mut html = format!(
        "<li data-id=\"{}\"{class_attr}><div class=\"view\"><input class=\"toggle\" type=\"checkbox\"{checked}><label>{title}</label>",
        escape_html(&task.id)
    );
    let _ = write!(
        html,
        "<span class=\"created\">{} {}</span>",
        escape_html(&task.creation_date),
        escape_html(&task.creation_time)
    );
    if let (Some(date), Some(time)) = (&task.completion_date, &task.completion_time) {
        let _ = write!(
            html,
            "<span class=\"completed-at\">{} {}</span>",
            escape_html(date),
            escape_html(time)
        );
    }
    let _ = write!(
        html,
        "<button class=\"destroy\"></button></div><input class=\"edit\" value=\"{title}\"></li>"
    );
    html
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
