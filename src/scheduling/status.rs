use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{Slot, parse_date, parse_time};
use crate::models::meeting::Meeting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingStatus {
    LiveNow,
    StartingSoon,
    Today,
    Tomorrow,
    /// Any other date, past or future; the label is the formatted date.
    OnDate,
    /// The meeting date could not be read.
    Undated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Default,
    Secondary,
    Outline,
}

impl BadgeVariant {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeVariant::Destructive => "badge badge-destructive",
            BadgeVariant::Default => "badge badge-default",
            BadgeVariant::Secondary => "badge badge-secondary",
            BadgeVariant::Outline => "badge badge-outline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub status: MeetingStatus,
    pub label: String,
    pub variant: BadgeVariant,
}

/// Display copy for the badges. Kept apart from the date math so each
/// dashboard can word them its own way.
#[derive(Debug, Clone)]
pub struct StatusLabels {
    pub live_now: String,
    pub starting_soon: String,
    pub today: String,
    pub tomorrow: String,
    pub undated: String,
    /// chrono format for `OnDate` labels.
    pub date_format: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            live_now: "Live Now".to_string(),
            starting_soon: "Starting Soon".to_string(),
            today: "Today".to_string(),
            tomorrow: "Tomorrow".to_string(),
            undated: "Date TBD".to_string(),
            date_format: "%b %-d".to_string(),
        }
    }
}

/// Classify one slot with the default labels.
pub fn classify(slot: &Slot<'_>, now: NaiveDateTime) -> StatusBadge {
    classify_with(slot, now, &StatusLabels::default())
}

/// First matching rule wins:
/// 1. `now` in `[start, end]` (inclusive): live
/// 2. today and `now < start`: starting soon
/// 3. today: today (after the meeting ended, or when end precedes start)
/// 4. tomorrow
/// 5. formatted date
///
/// Start and end combine the slot's calendar date with the hours and minutes
/// of its time fields.
pub fn classify_with(slot: &Slot<'_>, now: NaiveDateTime, labels: &StatusLabels) -> StatusBadge {
    let Some(date) = slot.date.and_then(parse_date) else {
        return badge(MeetingStatus::Undated, &labels.undated, BadgeVariant::Outline);
    };
    let today = now.date();
    let start = slot.start_time.and_then(parse_time).map(|t| date.and_time(t));
    let end = slot.end_time.and_then(parse_time).map(|t| date.and_time(t));

    if let (Some(start), Some(end)) = (start, end) {
        if now >= start && now <= end {
            return badge(MeetingStatus::LiveNow, &labels.live_now, BadgeVariant::Destructive);
        }
    }
    if let Some(start) = start {
        if now < start && date == today {
            return badge(
                MeetingStatus::StartingSoon,
                &labels.starting_soon,
                BadgeVariant::Default,
            );
        }
    }
    if date == today {
        return badge(MeetingStatus::Today, &labels.today, BadgeVariant::Secondary);
    }
    if today.succ_opt() == Some(date) {
        return badge(MeetingStatus::Tomorrow, &labels.tomorrow, BadgeVariant::Outline);
    }
    badge(
        MeetingStatus::OnDate,
        &date.format(&labels.date_format).to_string(),
        BadgeVariant::Outline,
    )
}

/// Classify a meeting on its effective slot.
pub fn classify_meeting(meeting: &Meeting, now: NaiveDateTime, labels: &StatusLabels) -> StatusBadge {
    match effective_slot(meeting, now) {
        Some(slot) => classify_with(&slot, now, labels),
        None => badge(MeetingStatus::Undated, &labels.undated, BadgeVariant::Outline),
    }
}

/// The slot a multi-slot meeting is shown by: the earliest one that has not
/// ended yet, or the latest one once all have ended. Slots without a
/// readable date sort last.
pub fn effective_slot<'a>(meeting: &'a Meeting, now: NaiveDateTime) -> Option<Slot<'a>> {
    let mut slots = meeting.slots();
    if slots.len() <= 1 {
        return slots.pop();
    }
    slots.sort_by_key(|s| sort_key(s));

    let not_ended = slots.iter().find(|s| match slot_end(s) {
        Some(end) => end >= now,
        None => s.date.and_then(parse_date).is_some_and(|d| d >= now.date()),
    });
    match not_ended {
        Some(slot) => Some(*slot),
        None => slots
            .iter()
            .rev()
            .find(|s| s.date.and_then(parse_date).is_some())
            .or(slots.first())
            .copied(),
    }
}

/// True once every slot has ended. A slot without a readable end time ends
/// with its day; undated meetings never end.
pub fn has_ended(meeting: &Meeting, now: NaiveDateTime) -> bool {
    meeting.slots().iter().all(|s| match slot_end(s) {
        Some(end) => end < now,
        None => s.date.and_then(parse_date).is_some_and(|d| d < now.date()),
    })
}

/// Start of a slot, midnight when the start time is unreadable.
pub fn slot_start(slot: &Slot<'_>) -> Option<NaiveDateTime> {
    let date = slot.date.and_then(parse_date)?;
    let time = slot.start_time.and_then(parse_time).unwrap_or_default();
    Some(date.and_time(time))
}

fn sort_key(slot: &Slot<'_>) -> (bool, Option<NaiveDate>, Option<chrono::NaiveTime>) {
    let date = slot.date.and_then(parse_date);
    (date.is_none(), date, slot.start_time.and_then(parse_time))
}

fn slot_end(slot: &Slot<'_>) -> Option<NaiveDateTime> {
    let date = slot.date.and_then(parse_date)?;
    let time = slot.end_time.and_then(parse_time)?;
    Some(date.and_time(time))
}

fn badge(status: MeetingStatus, label: &str, variant: BadgeVariant) -> StatusBadge {
    StatusBadge {
        status,
        label: label.to_string(),
        variant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::TimeSlot;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn test_live_now_bounds_are_inclusive() {
        let slot = Slot::new("2024-01-01", "2024-01-01T09:00", "2024-01-01T10:00");
        assert_eq!(classify(&slot, at("2024-01-01T09:00")).status, MeetingStatus::LiveNow);
        assert_eq!(classify(&slot, at("2024-01-01T10:00")).status, MeetingStatus::LiveNow);
        let b = classify(&slot, at("2024-01-01T09:30"));
        assert_eq!(b.label, "Live Now");
        assert_eq!(b.variant, BadgeVariant::Destructive);
    }

    #[test]
    fn test_time_fields_contribute_only_hours_and_minutes() {
        // The time field's own date is ignored in favour of the meeting date.
        let slot = Slot::new("2024-01-01", "1999-12-31T09:00", "1999-12-31T10:00");
        assert_eq!(classify(&slot, at("2024-01-01T09:15")).status, MeetingStatus::LiveNow);
    }

    #[test]
    fn test_after_end_on_same_day_is_dated() {
        let slot = Slot::new("2024-01-01", "09:00", "10:00");
        let b = classify(&slot, at("2024-01-01T11:00"));
        // Rule 3 catches it: meeting date is still today.
        assert_eq!(b.status, MeetingStatus::Today);
        assert_eq!(b.variant, BadgeVariant::Secondary);
    }

    #[test]
    fn test_end_before_start_falls_through_to_today() {
        let slot = Slot::new("2024-01-01", "10:00", "09:00");
        let b = classify(&slot, at("2024-01-01T10:30"));
        assert_eq!(b.status, MeetingStatus::Today);
    }

    #[test]
    fn test_past_and_future_dates_are_formatted() {
        let slot = Slot::new("2024-01-05", "09:00", "10:00");
        let b = classify(&slot, at("2024-01-01T08:00"));
        assert_eq!(b.status, MeetingStatus::OnDate);
        assert_eq!(b.label, "Jan 5");
        assert_eq!(b.variant, BadgeVariant::Outline);

        let b = classify(&slot, at("2024-02-01T08:00"));
        assert_eq!(b.label, "Jan 5");
    }

    #[test]
    fn test_missing_times_still_get_day_labels() {
        let slot = Slot {
            date: Some("2024-01-02"),
            start_time: None,
            end_time: Some("garbage"),
        };
        assert_eq!(classify(&slot, at("2024-01-01T12:00")).status, MeetingStatus::Tomorrow);
        assert_eq!(classify(&slot, at("2024-01-02T12:00")).status, MeetingStatus::Today);
    }

    #[test]
    fn test_undated() {
        let slot = Slot {
            date: None,
            start_time: Some("09:00"),
            end_time: Some("10:00"),
        };
        let b = classify(&slot, at("2024-01-01T09:30"));
        assert_eq!(b.status, MeetingStatus::Undated);
        assert_eq!(b.label, "Date TBD");
    }

    #[test]
    fn test_custom_labels() {
        let labels = StatusLabels {
            live_now: "In progress".to_string(),
            date_format: "%d/%m".to_string(),
            ..StatusLabels::default()
        };
        let slot = Slot::new("2024-01-01", "09:00", "10:00");
        assert_eq!(classify_with(&slot, at("2024-01-01T09:30"), &labels).label, "In progress");
        assert_eq!(classify_with(&slot, at("2023-12-01T09:30"), &labels).label, "01/01");
    }

    #[test]
    fn test_effective_slot_picks_next_unfinished() {
        let meeting = Meeting {
            time_slots: vec![
                TimeSlot {
                    date: Some("2024-01-03".into()),
                    start_time: Some("10:00".into()),
                    end_time: Some("11:00".into()),
                },
                TimeSlot {
                    date: Some("2024-01-01".into()),
                    start_time: Some("10:00".into()),
                    end_time: Some("11:00".into()),
                },
            ],
            ..Meeting::default()
        };
        let now = at("2024-01-02T09:00");
        let slot = effective_slot(&meeting, now).unwrap();
        assert_eq!(slot.date, Some("2024-01-03"));

        let later = at("2024-01-05T09:00");
        assert_eq!(effective_slot(&meeting, later).unwrap().date, Some("2024-01-03"));

        let earlier = at("2024-01-01T10:30");
        let b = classify_meeting(&meeting, earlier, &StatusLabels::default());
        assert_eq!(b.status, MeetingStatus::LiveNow);
    }

    #[test]
    fn test_has_ended() {
        let meeting = Meeting {
            date: Some("2024-01-01".into()),
            start_time: Some("09:00".into()),
            end_time: Some("10:00".into()),
            ..Meeting::default()
        };
        assert!(!has_ended(&meeting, at("2024-01-01T10:00")));
        assert!(has_ended(&meeting, at("2024-01-01T10:01")));

        let no_times = Meeting {
            date: Some("2024-01-01".into()),
            ..Meeting::default()
        };
        assert!(!has_ended(&no_times, at("2024-01-01T23:00")));
        assert!(has_ended(&no_times, at("2024-01-02T00:00")));

        assert!(!has_ended(&Meeting::default(), at("2030-01-01T00:00")));
    }
}
