use reqwest::Method;

use super::types::*;
use crate::auth::session::Role;
use crate::backend::{BackendClient, BackendError, endpoints};

pub async fn list(client: &BackendClient, role: Role, cookie: Option<&str>) -> Result<Vec<Employee>, BackendError> {
    client.get(&endpoints::employees(role), cookie).await
}

pub async fn find(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    id: &str,
) -> Result<Employee, BackendError> {
    client.get(&endpoints::employee(role, id), cookie).await
}

pub async fn replace(
    client: &BackendClient,
    role: Role,
    cookie: Option<&str>,
    id: &str,
    update: &EmployeeUpdate,
) -> Result<Option<String>, BackendError> {
    client
        .send(Method::PUT, &endpoints::employee(role, id), Some(update), cookie)
        .await
}

pub async fn candidates(client: &BackendClient, cookie: Option<&str>) -> Result<Vec<Candidate>, BackendError> {
    client.get(endpoints::CANDIDATES, cookie).await
}

pub async fn payments(client: &BackendClient, cookie: Option<&str>) -> Result<Vec<Payment>, BackendError> {
    client.get(endpoints::PAYMENTS, cookie).await
}
