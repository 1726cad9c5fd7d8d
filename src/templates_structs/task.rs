use askama::Template;

use super::{PageContext, SelectOption};
use crate::models::task::{Task, TaskStatus};

pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub priority_label: &'static str,
    pub progress: u8,
    pub deadline: String,
    pub assigned_by: String,
    pub assigned_to: String,
    pub highlights: Vec<String>,
    pub status_options: Vec<SelectOption>,
}

impl TaskRow {
    pub fn build(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status_label: task.status.label(),
            status_class: status_class(task.status),
            priority_label: task.priority.label(),
            progress: task.progress_percent(),
            deadline: task
                .deadline
                .as_deref()
                .and_then(crate::scheduling::parse_date)
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_default(),
            assigned_by: task
                .assigned_by
                .as_ref()
                .map(|p| p.display_name().to_string())
                .unwrap_or_default(),
            assigned_to: task
                .assigned_to
                .as_ref()
                .map(|p| p.display_name().to_string())
                .unwrap_or_default(),
            highlights: task.highlights.clone(),
            status_options: status_options(task.status.as_str()),
        }
    }
}

fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "badge badge-outline",
        TaskStatus::InProgress => "badge badge-default",
        TaskStatus::Completed => "badge badge-secondary",
        TaskStatus::Overdue => "badge badge-destructive",
    }
}

pub fn status_options(current: &str) -> Vec<SelectOption> {
    SelectOption::list(TaskStatus::ALL.iter().map(|s| (s.as_str(), s.label())), current)
}

#[derive(Template)]
#[template(path = "tasks/list.html")]
pub struct TasksTemplate {
    pub ctx: PageContext,
    pub tasks: Vec<TaskRow>,
    /// Status filter tabs; an empty value means all.
    pub filters: Vec<SelectOption>,
    pub load_error: Option<String>,
}
