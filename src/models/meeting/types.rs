use serde::{Deserialize, Serialize};

use crate::models::{flexible_id, nullable_string};
use crate::scheduling::Slot;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub employee_id: String,
}

/// A meeting as returned by the backend. Pages differ in whether they send a
/// single `date`/`startTime`/`endTime` or a list of `timeSlots`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub platform: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub google_meet_link: Option<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub meeting_type: String,
}

impl Meeting {
    /// Every scheduled occurrence. `timeSlots` wins when present; otherwise
    /// the top-level date/start/end form the single slot.
    pub fn slots(&self) -> Vec<Slot<'_>> {
        if self.time_slots.is_empty() {
            return vec![Slot {
                date: self.date.as_deref(),
                start_time: self.start_time.as_deref(),
                end_time: self.end_time.as_deref(),
            }];
        }
        self.time_slots
            .iter()
            .map(|ts| Slot {
                date: ts.date.as_deref().or(self.date.as_deref()),
                start_time: ts.start_time.as_deref(),
                end_time: ts.end_time.as_deref(),
            })
            .collect()
    }

    pub fn has_meet_link(&self) -> bool {
        self.google_meet_link
            .as_deref()
            .is_some_and(|l| !l.trim().is_empty())
    }

    /// Departments if any, otherwise participant names.
    pub fn attendee_summary(&self) -> String {
        if !self.departments.is_empty() {
            return self.departments.join(", ");
        }
        self.participants
            .iter()
            .map(|p| if p.name.is_empty() { p.email.as_str() } else { p.name.as_str() })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Payload for `POST /api/{role}/meetings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    pub title: String,
    pub platform: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_meet_link: Option<String>,
    pub departments: Vec<String>,
    pub description: String,
    pub meeting_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "665f1c",
            "title": "Weekly sync",
            "platform": "Google Meet",
            "date": "2024-01-01T00:00:00.000Z",
            "startTime": "2024-01-01T09:00",
            "endTime": "2024-01-01T10:00",
            "googleMeetLink": "https://meet.google.com/abc",
            "departments": ["Sales", "HR"],
            "description": null,
            "status": "scheduled"
        }"#;
        let m: Meeting = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, "665f1c");
        assert_eq!(m.description, "");
        assert!(m.has_meet_link());
        assert_eq!(m.attendee_summary(), "Sales, HR");
        assert_eq!(m.slots().len(), 1);
    }

    #[test]
    fn test_time_slots_inherit_date() {
        let json = r#"{
            "id": 7,
            "title": "Interviews",
            "date": "2024-03-04",
            "timeSlots": [
                {"startTime": "10:00", "endTime": "11:00"},
                {"date": "2024-03-05", "startTime": "14:00", "endTime": "15:00"}
            ],
            "participants": [{"name": "Ravi", "email": "ravi@example.com"}, {"email": "mina@example.com"}]
        }"#;
        let m: Meeting = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, "7");
        let slots = m.slots();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].date, Some("2024-03-04"));
        assert_eq!(slots[1].date, Some("2024-03-05"));
        assert_eq!(m.attendee_summary(), "Ravi, mina@example.com");
        assert!(!m.has_meet_link());
    }
}
