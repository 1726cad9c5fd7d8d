//! Meeting date math shared by every role's calendar pages.
//!
//! - `status`: derive the display badge (`Live Now`, `Starting Soon`, ...)
//! - `slots`: find the meetings occupying a (date, time, room) cell
//!
//! Both work on [`Slot`], a borrowed view of one `{date, startTime, endTime}`
//! occurrence. The backend sends these fields in several shapes (plain dates,
//! naive ISO datetimes, offset ISO datetimes, bare `HH:MM`), so all parsing
//! goes through [`parse_date`] and [`parse_time`].

pub mod slots;
pub mod status;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};

pub use slots::{VIRTUAL_ROOM, day_grid, default_time_labels, matching_slots, overlaps};
pub use status::{BadgeVariant, MeetingStatus, StatusBadge, StatusLabels, classify, classify_meeting};

/// One scheduled occurrence of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub date: Option<&'a str>,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
}

impl<'a> Slot<'a> {
    pub fn new(date: &'a str, start_time: &'a str, end_time: &'a str) -> Self {
        Self {
            date: Some(date),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }
}

/// Calendar date of a date or datetime string. Only the leading
/// `YYYY-MM-DD` is read; a calendar date carries no time zone.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

/// Hours and minutes of a time or datetime string. Offset-bearing ISO
/// datetimes are converted to local time first; seconds are dropped.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if let Some(dt) = parse_offset_datetime(value) {
        let local = dt.with_timezone(&Local).time();
        return NaiveTime::from_hms_opt(local.hour(), local.minute(), 0);
    }

    let time_part = match value.find('T') {
        Some(idx) => &value[idx + 1..],
        None if value.len() > 10 && value.as_bytes()[10] == b' ' => &value[11..],
        None => value,
    };
    let mut parts = time_part.splitn(3, ':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.get(..2)?.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Strict zero-padded `HH:MM`, as used by calendar query parameters.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

fn parse_offset_datetime(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
    let t_idx = value.find('T')?;
    let time_part = &value[t_idx + 1..];
    let has_offset = time_part.ends_with('Z') || time_part.contains('+') || time_part.contains('-');
    if !has_offset {
        return None;
    }
    let normalized = match value.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z"))
        .ok()
}
