//! Backend client against a mock REST server: envelope unwrapping, error
//! mapping and session cookie handling.

mod common;

use mockito::Matcher;
use serde_json::json;

use bizdesk::auth::session::Role;
use bizdesk::backend::{BackendClient, BackendError, endpoints};
use bizdesk::models::employee::EmployeeData;
use bizdesk::models::{meeting, task};
use common::ok_envelope;

#[tokio::test]
async fn test_list_unwraps_envelope_and_forwards_cookie() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/hr/meetings")
        .match_header("cookie", "token=abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_envelope(json!([
            {"_id": "m1", "title": "Sync", "date": "2024-01-01", "startTime": "09:00", "endTime": "10:00"},
            {"id": 2, "title": "Review"}
        ])))
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let meetings = meeting::list(&client, Role::Hr, Some("token=abc")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(meetings.len(), 2);
    assert_eq!(meetings[0].id, "m1");
    assert_eq!(meetings[1].id, "2");
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/tl/tasks")
        .with_status(200)
        .with_body(r#"{"success": false, "message": "No team assigned"}"#)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let err = task::list(&client, Role::TeamLeader, None).await.unwrap_err();
    match err {
        BackendError::Rejected(msg) => assert_eq!(msg, "No team assigned"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_2xx_maps_status_and_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("PUT", "/api/hr/employees/e1")
        .with_status(422)
        .with_body(r#"{"success": false, "message": "Email already exists"}"#)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let err = client
        .send(reqwest::Method::PUT, &endpoints::employee(Role::Hr, "e1"), Some(&json!({})), None)
        .await
        .unwrap_err();
    match err {
        BackendError::Status { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Email already exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/ceo/payments")
        .with_status(401)
        .with_body("")
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let err = client
        .get::<Vec<serde_json::Value>>(endpoints::PAYMENTS, Some("token=old"))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Unauthorized));
}

#[tokio::test]
async fn test_list_or_empty_swallows_failures() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/pm/meetings")
        .with_status(500)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let items: Vec<serde_json::Value> = client.get_list_or_empty("/api/pm/meetings", None).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_mutation_returns_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/project-manager/tasks/t1")
        .match_body(Matcher::Json(json!({"progress": 60})))
        .with_status(200)
        .with_body(r#"{"success": true, "message": "Progress saved", "data": null}"#)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let msg = task::update_progress(&client, Role::ProjectManager, None, "t1", 60)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(msg.as_deref(), Some("Progress saved"));
}

#[tokio::test]
async fn test_login_captures_session_cookie() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", endpoints::LOGIN)
        .match_body(Matcher::Json(json!({"email": "asha@example.com", "password": "secret"})))
        .with_status(200)
        .with_header("set-cookie", "token=xyz; Path=/; HttpOnly")
        .with_body(ok_envelope(json!({
            "_id": "665a", "name": "Asha", "email": "asha@example.com", "role": "HR"
        })))
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let login = client
        .login::<_, EmployeeData>(endpoints::LOGIN, &json!({"email": "asha@example.com", "password": "secret"}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(login.cookie.as_deref(), Some("token=xyz"));
    assert_eq!(login.data.role, Role::Hr);
    assert_eq!(login.data.into_identity().employee_id, "665a");
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on the discard port.
    let client = BackendClient::new("http://127.0.0.1:9");
    let err = meeting::list(&client, Role::Ceo, None).await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
    assert_eq!(err.user_message(), "The server could not be reached. Please try again.");
}
