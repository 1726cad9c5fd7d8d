//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDateTime;

use bizdesk::models::meeting::Meeting;

/// 1x1 transparent PNG.
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("test datetime")
}

pub fn meeting(id: &str, date: &str, start: &str, end: &str, link: Option<&str>) -> Meeting {
    Meeting {
        id: id.to_string(),
        title: format!("Meeting {id}"),
        date: Some(date.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        google_meet_link: link.map(String::from),
        ..Meeting::default()
    }
}

/// JSON body of a successful backend envelope.
pub fn ok_envelope(data: serde_json::Value) -> String {
    serde_json::json!({"success": true, "data": data}).to_string()
}
