use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::{flash_outcome, list_or_notice, redirect};
use crate::auth::csrf;
use crate::auth::session::{backend_cookie, require_identity, set_flash};
use crate::backend::BackendClient;
use crate::errors::{AppError, render};
use crate::models::task::{self, ForwardTask, TaskStatus};
use crate::templates_structs::{PageContext, SelectOption, TaskRow, TasksTemplate};

#[derive(Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub csrf_token: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct ProgressForm {
    pub csrf_token: String,
    pub progress: String,
}

#[derive(Deserialize)]
pub struct ForwardForm {
    pub csrf_token: String,
    pub assigned_to: String,
    #[serde(default)]
    pub note: String,
}

/// GET /tasks?status=...
pub async fn list(
    client: web::Data<BackendClient>,
    session: Session,
    query: web::Query<TaskFilter>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/tasks")?;
    let cookie = backend_cookie(&session);
    let result = task::list(&client, ctx.identity.role, cookie.as_deref()).await;
    let (tasks, load_error) = list_or_notice(&session, "tasks", result)?;

    let filter: Option<TaskStatus> = query.status.parse().ok();
    let rows = tasks
        .iter()
        .filter(|t| filter.is_none_or(|s| t.status == s))
        .map(TaskRow::build)
        .collect();

    let current = filter.map(TaskStatus::as_str).unwrap_or("");
    let filters = SelectOption::list(
        std::iter::once(("", "All")).chain(TaskStatus::ALL.iter().map(|s| (s.as_str(), s.label()))),
        current,
    );

    render(TasksTemplate {
        ctx,
        tasks: rows,
        filters,
        load_error,
    })
}

/// POST /tasks/{id}/status
pub async fn update_status(
    client: web::Data<BackendClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_identity(&session)?;
    let status: TaskStatus = match form.status.parse() {
        Ok(s) => s,
        Err(msg) => {
            set_flash(&session, &msg);
            return Ok(redirect("/tasks"));
        }
    };

    let cookie = backend_cookie(&session);
    let id = path.into_inner();
    let result = task::update_status(&client, identity.role, cookie.as_deref(), &id, status).await;
    flash_outcome(&session, result, "Task status updated", "/tasks")
}

/// POST /tasks/{id}/progress
pub async fn update_progress(
    client: web::Data<BackendClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<ProgressForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_identity(&session)?;
    let Some(progress) = parse_progress(&form.progress) else {
        set_flash(&session, "Progress must be a whole number from 0 to 100");
        return Ok(redirect("/tasks"));
    };

    let cookie = backend_cookie(&session);
    let id = path.into_inner();
    let result = task::update_progress(&client, identity.role, cookie.as_deref(), &id, progress).await;
    flash_outcome(&session, result, "Task progress updated", "/tasks")
}

/// POST /tasks/{id}/forward
pub async fn forward(
    client: web::Data<BackendClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<ForwardForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_identity(&session)?;
    let assigned_to = form.assigned_to.trim();
    if assigned_to.is_empty() {
        set_flash(&session, "Choose who to forward the task to");
        return Ok(redirect("/tasks"));
    }

    let body = ForwardTask {
        assigned_to: assigned_to.to_string(),
        note: form.note.trim().to_string(),
    };
    let cookie = backend_cookie(&session);
    let id = path.into_inner();
    let result = task::forward(&client, identity.role, cookie.as_deref(), &id, &body).await;
    flash_outcome(&session, result, "Task forwarded", "/tasks")
}

fn parse_progress(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok().filter(|p| *p <= 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress() {
        assert_eq!(parse_progress("0"), Some(0));
        assert_eq!(parse_progress(" 75 "), Some(75));
        assert_eq!(parse_progress("100"), Some(100));
        assert_eq!(parse_progress("101"), None);
        assert_eq!(parse_progress("-1"), None);
        assert_eq!(parse_progress("half"), None);
    }
}
