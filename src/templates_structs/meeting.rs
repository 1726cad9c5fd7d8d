use askama::Template;
use chrono::NaiveDateTime;

use super::PageContext;
use crate::models::meeting::Meeting;
use crate::scheduling::{self, StatusLabels, parse_date, parse_time, slots::GridRow, status};

/// A meeting as shown in lists and dashboard widgets.
pub struct MeetingRow {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub when: String,
    pub attendees: String,
    pub link: Option<String>,
    pub badge_label: String,
    pub badge_class: &'static str,
}

impl MeetingRow {
    pub fn build(meeting: &Meeting, now: NaiveDateTime, labels: &StatusLabels) -> Self {
        let badge = scheduling::classify_meeting(meeting, now, labels);
        let when = status::effective_slot(meeting, now)
            .map(|slot| {
                let date = slot
                    .date
                    .and_then(parse_date)
                    .map(|d| d.format("%a %b %-d").to_string())
                    .unwrap_or_default();
                format!("{} {}", date, time_range(slot.start_time, slot.end_time))
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();
        Self {
            id: meeting.id.clone(),
            title: meeting.title.clone(),
            platform: meeting.platform.clone(),
            when,
            attendees: meeting.attendee_summary(),
            link: meeting
                .has_meet_link()
                .then(|| meeting.google_meet_link.clone().unwrap_or_default()),
            badge_label: badge.label,
            badge_class: badge.variant.css_class(),
        }
    }
}

/// `09:00 - 10:00`, or empty when either end is unreadable.
pub fn time_range(start: Option<&str>, end: Option<&str>) -> String {
    match (start.and_then(parse_time), end.and_then(parse_time)) {
        (Some(s), Some(e)) => format!("{} - {}", s.format("%H:%M"), e.format("%H:%M")),
        _ => String::new(),
    }
}

#[derive(Template)]
#[template(path = "meetings/list.html")]
pub struct MeetingsListTemplate {
    pub ctx: PageContext,
    pub upcoming: Vec<MeetingRow>,
    pub past: Vec<MeetingRow>,
    pub load_error: Option<String>,
}

pub struct CalendarEntry {
    pub title: String,
    pub time_range: String,
    pub link: Option<String>,
}

pub struct CalendarCell {
    pub room: String,
    pub entries: Vec<CalendarEntry>,
}

pub struct CalendarRow {
    pub time: String,
    pub cells: Vec<CalendarCell>,
}

impl CalendarRow {
    pub fn from_grid(rows: Vec<GridRow<'_>>) -> Vec<CalendarRow> {
        rows.into_iter()
            .map(|row| CalendarRow {
                time: row.time,
                cells: row
                    .cells
                    .into_iter()
                    .map(|cell| CalendarCell {
                        room: cell.room,
                        entries: cell
                            .meetings
                            .into_iter()
                            .map(|(m, slot)| CalendarEntry {
                                title: m.title.clone(),
                                time_range: time_range(slot.start_time, slot.end_time),
                                link: m.google_meet_link.clone().filter(|l| !l.trim().is_empty()),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "meetings/calendar.html")]
pub struct MeetingCalendarTemplate {
    pub ctx: PageContext,
    pub date: String,
    pub date_label: String,
    pub prev_date: String,
    pub next_date: String,
    pub rooms: Vec<String>,
    pub rows: Vec<CalendarRow>,
    pub load_error: Option<String>,
}

#[derive(Template)]
#[template(path = "meetings/form.html")]
pub struct MeetingFormTemplate {
    pub ctx: PageContext,
    pub form: crate::handlers::meeting_handlers::MeetingForm,
    pub platforms: Vec<super::SelectOption>,
    pub errors: Vec<String>,
}
