//! Hire wizard flows end to end: step gating, photo upload and submission
//! against a mock backend.

mod common;

use mockito::Matcher;
use serde_json::json;

use bizdesk::backend::BackendClient;
use bizdesk::upload::MemoryUploader;
use bizdesk::wizard::{HireKind, SubmitOutcome, Wizard, WizardState};
use common::PNG_DATA_URL;

const PERSONAL: [(&str, &str); 7] = [
    ("fullName", "Ravi Kumar"),
    ("email", "ravi@example.com"),
    ("phone", "9876543210"),
    ("dateOfBirth", "1995-04-12"),
    ("gender", "Male"),
    ("address", "12 MG Road, Pune"),
    ("pincode", "411001"),
];

const IDENTITY: [(&str, &str); 4] = [
    ("aadharNumber", "123412341234"),
    ("panNumber", "abcde1234f"),
    ("bankAccountNumber", "00112233445"),
    ("ifscCode", "sbin0001234"),
];

const EMPLOYMENT: [(&str, &str); 4] = [
    ("languages", "Hindi, English"),
    ("shift", "Morning"),
    ("salary", "18000"),
    ("joiningDate", "2024-07-01"),
];

/// A telecaller wizard filled through to its last step.
async fn filled_telecaller() -> Wizard<'static> {
    let mut w = Wizard::new(HireKind::Telecaller.schema());
    w.set_input(PERSONAL);
    let uploader = MemoryUploader::default();
    assert!(w.attach_photo(&uploader, "photo", PNG_DATA_URL).await);
    assert!(w.next());
    w.set_input(IDENTITY);
    assert!(w.next());
    w.set_input(EMPLOYMENT);
    assert!(w.is_last_step());
    w
}

#[test]
fn test_step_gating_reports_every_invalid_field() {
    let mut w = Wizard::new(HireKind::Hr.schema());
    w.set_input([("fullName", "R"), ("phone", "12345"), ("pincode", "4110")]);
    assert!(!w.next());
    assert_eq!(w.current_step(), 0);
    assert_eq!(w.error("fullName"), Some("Full name must be at least 2 characters"));
    assert_eq!(w.error("phone"), Some("Phone must be exactly 10 digits"));
    assert_eq!(w.error("pincode"), Some("Pincode must be exactly 6 digits"));
    assert_eq!(w.error("email"), Some("Email is required"));
    // Photo is optional.
    assert_eq!(w.error("photo"), None);
}

#[test]
fn test_codes_are_uppercased() {
    let mut w = Wizard::resume(
        HireKind::Hr.schema(),
        WizardState { current_step: 1, ..WizardState::default() },
    );
    w.set_input(IDENTITY);
    assert!(w.next());
    assert_eq!(w.value("panNumber"), "ABCDE1234F");
    assert_eq!(w.value("ifscCode"), "SBIN0001234");
}

#[test]
fn test_going_back_keeps_data() {
    let mut w = Wizard::new(HireKind::Developer.schema());
    w.set_input(PERSONAL);
    assert!(w.next());
    w.set_input([("aadharNumber", "1234")]);
    w.prev();
    assert_eq!(w.current_step(), 0);
    assert_eq!(w.value("fullName"), "Ravi Kumar");
    assert_eq!(w.value("aadharNumber"), "1234");
}

#[test]
fn test_state_survives_serialization() {
    let mut w = Wizard::new(HireKind::SalesEmployee.schema());
    w.set_input(PERSONAL);
    assert!(w.next());
    let saved = serde_json::to_string(&w.into_state()).unwrap();

    let state: WizardState = serde_json::from_str(&saved).unwrap();
    let w = Wizard::resume(HireKind::SalesEmployee.schema(), state);
    assert_eq!(w.current_step(), 1);
    assert_eq!(w.value("email"), "ravi@example.com");
}

#[tokio::test]
async fn test_submit_posts_payload_and_resets() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hr/hire/telecaller")
        .match_header("cookie", "token=abc")
        .match_body(Matcher::PartialJson(json!({
            "fullName": "Ravi Kumar",
            "panNumber": "ABCDE1234F",
            "photo": "memory://uploads/1.png",
            "salary": 18000.0,
            "shift": "Morning"
        })))
        .with_status(201)
        .with_body(r#"{"success": true, "message": "Telecaller hired", "data": {"id": "c1"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let mut w = filled_telecaller().await;
    match w.submit(&client, Some("token=abc")).await {
        SubmitOutcome::Submitted(msg) => assert_eq!(msg.as_deref(), Some("Telecaller hired")),
        other => panic!("unexpected outcome: {other:?}"),
    }

    mock.assert_async().await;
    assert_eq!(w.state(), &WizardState::default());
}

#[tokio::test]
async fn test_failed_submit_keeps_data() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/hr/hire/telecaller")
        .with_status(409)
        .with_body(r#"{"success": false, "message": "Email already registered"}"#)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let mut w = filled_telecaller().await;
    assert!(matches!(w.submit(&client, None).await, SubmitOutcome::Failed(_)));

    assert!(w.is_last_step());
    assert_eq!(w.value("fullName"), "Ravi Kumar");
    assert_eq!(w.state().message.as_deref(), Some("Email already registered"));
}

#[tokio::test]
async fn test_invalid_last_step_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = BackendClient::new(&server.url());
    let mut w = filled_telecaller().await;
    w.set_input([("salary", "-5")]);
    assert!(matches!(w.submit(&client, None).await, SubmitOutcome::Invalid));

    mock.assert_async().await;
    assert_eq!(w.error("salary"), Some("Salary must be greater than 0"));
}

#[tokio::test]
async fn test_submit_before_last_step_is_invalid() {
    let server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url());
    let mut w = Wizard::new(HireKind::Hr.schema());
    w.set_input(PERSONAL);
    assert!(matches!(w.submit(&client, None).await, SubmitOutcome::Invalid));
    assert_eq!(w.current_step(), 0);
}
