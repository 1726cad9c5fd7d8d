use reqwest::Method;

use super::types::*;
use crate::auth::session::Role;
use crate::backend::{BackendClient, BackendError, endpoints};

/// All meetings visible to `role`.
pub async fn list(client: &BackendClient, role: Role, cookie: Option<&str>) -> Result<Vec<Meeting>, BackendError> {
    client.get(&endpoints::meetings(role), cookie).await
}

pub async fn create(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    meeting: &NewMeeting,
) -> Result<Option<String>, BackendError> {
    client
        .send(Method::POST, &endpoints::meetings(role), Some(meeting), cookie)
        .await
}

pub async fn delete(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    id: &str,
) -> Result<Option<String>, BackendError> {
    client.delete(&endpoints::meeting(role, id), cookie).await
}
