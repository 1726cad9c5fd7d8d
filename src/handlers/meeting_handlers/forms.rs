/// Form structures for meeting pages.
use serde::Deserialize;

use crate::models::meeting::NewMeeting;
use crate::scheduling::{VIRTUAL_ROOM, parse_hhmm};
use crate::validate;

pub const PLATFORMS: [&str; 4] = ["Google Meet", "Zoom", "Microsoft Teams", "In Person"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub google_meet_link: String,
    /// Comma-separated department names.
    #[serde(default)]
    pub departments: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meeting_type: String,
}

impl MeetingForm {
    /// Validate and build the backend payload, or return every problem found.
    pub fn to_payload(&self) -> Result<NewMeeting, Vec<String>> {
        let mut errors = Vec::new();
        let title = self.title.trim();
        let link = self.google_meet_link.trim();

        if let Some(e) = validate::validate_required(title, "Title", 200) {
            errors.push(e);
        }
        if !PLATFORMS.contains(&self.platform.as_str()) {
            errors.push("Please choose a platform".to_string());
        }
        if let Some(e) = validate::validate_date(self.date.trim(), "Date") {
            errors.push(e);
        }
        errors.extend(validate::validate_time(&self.start_time, "Start time"));
        errors.extend(validate::validate_time(&self.end_time, "End time"));
        if let (Some(start), Some(end)) = (parse_hhmm(&self.start_time), parse_hhmm(&self.end_time)) {
            if end <= start {
                errors.push("End time must be after start time".to_string());
            }
        }
        if link.is_empty() {
            if self.platform == "Google Meet" {
                errors.push("Google Meet meetings need a meeting link".to_string());
            }
        } else if let Some(e) = validate::validate_url(link, "Meeting link") {
            errors.push(e);
        }
        if let Some(e) = validate::validate_optional(&self.description, "Description", 2000) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewMeeting {
            title: title.to_string(),
            platform: self.platform.clone(),
            date: self.date.trim().to_string(),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            google_meet_link: (!link.is_empty()).then(|| link.to_string()),
            departments: self
                .departments
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect(),
            description: self.description.trim().to_string(),
            meeting_type: if self.meeting_type.trim().is_empty() {
                "general".to_string()
            } else {
                self.meeting_type.trim().to_string()
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: String,
    pub time: String,
    #[serde(default = "default_room")]
    pub room: String,
}

fn default_room() -> String {
    VIRTUAL_ROOM.to_string()
}

#[derive(Debug, Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}
