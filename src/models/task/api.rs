use reqwest::Method;

use super::types::*;
use crate::auth::session::Role;
use crate::backend::{BackendClient, BackendError, endpoints};

pub async fn list(client: &BackendClient, role: Role, cookie: Option<&str>) -> Result<Vec<Task>, BackendError> {
    client.get(&endpoints::tasks(role), cookie).await
}

/// The backend validates the transition; we only offer the fixed picker.
pub async fn update_status(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    id: &str,
    status: TaskStatus,
) -> Result<Option<String>, BackendError> {
    client
        .send(Method::PATCH, &endpoints::task(role, id), Some(&StatusUpdate { status }), cookie)
        .await
}

pub async fn update_progress(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    id: &str,
    progress: u8,
) -> Result<Option<String>, BackendError> {
    client
        .send(Method::PATCH, &endpoints::task(role, id), Some(&ProgressUpdate { progress }), cookie)
        .await
}

pub async fn forward(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    id: &str,
    body: &ForwardTask,
) -> Result<Option<String>, BackendError> {
    client
        .send(Method::POST, &endpoints::forward_task(role, id), Some(body), cookie)
        .await
}
