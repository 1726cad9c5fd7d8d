use chrono::{NaiveDate, NaiveTime};

use super::{Slot, parse_date, parse_hhmm, parse_time};
use crate::models::meeting::Meeting;

pub const VIRTUAL_ROOM: &str = "Virtual Meeting Room";

/// Meetings occupying the `(date, time)` cell of `room`'s calendar column.
///
/// A meeting matches when one of its slots falls on `date` and
/// `start <= time < end`. The virtual room additionally requires a
/// conferencing link. Physical rooms apply no room filter: bookings do not
/// record a room, so every physical column shows the same meetings.
///
/// Missing or malformed times never match.
pub fn overlaps<'a>(meetings: &'a [Meeting], time: &str, room: &str, date: &str) -> Vec<&'a Meeting> {
    matching_slots(meetings, time, room, date)
        .into_iter()
        .map(|(m, _)| m)
        .collect()
}

/// Same matches as [`overlaps`], each paired with the slot that covers the
/// cell, so multi-slot meetings show the occurrence on `date`.
pub fn matching_slots<'a>(
    meetings: &'a [Meeting],
    time: &str,
    room: &str,
    date: &str,
) -> Vec<(&'a Meeting, Slot<'a>)> {
    let (Some(time), Some(date)) = (parse_hhmm(time), parse_date(date)) else {
        return Vec::new();
    };
    let virtual_room = room == VIRTUAL_ROOM;

    meetings
        .iter()
        .filter(|m| !virtual_room || m.has_meet_link())
        .filter_map(|m| {
            m.slots()
                .into_iter()
                .find(|s| slot_covers(s, date, time))
                .map(|s| (m, s))
        })
        .collect()
}

pub fn slot_covers(slot: &Slot<'_>, date: NaiveDate, time: NaiveTime) -> bool {
    if slot.date.and_then(parse_date) != Some(date) {
        return false;
    }
    match (
        slot.start_time.and_then(parse_time),
        slot.end_time.and_then(parse_time),
    ) {
        (Some(start), Some(end)) => start <= time && time < end,
        _ => false,
    }
}

#[derive(Debug)]
pub struct GridCell<'a> {
    pub room: String,
    pub meetings: Vec<(&'a Meeting, Slot<'a>)>,
}

#[derive(Debug)]
pub struct GridRow<'a> {
    pub time: String,
    pub cells: Vec<GridCell<'a>>,
}

/// Day view: one row per time label, one cell per room.
pub fn day_grid<'a>(
    meetings: &'a [Meeting],
    date: &str,
    rooms: &[String],
    times: &[String],
) -> Vec<GridRow<'a>> {
    times
        .iter()
        .map(|time| GridRow {
            time: time.clone(),
            cells: rooms
                .iter()
                .map(|room| GridCell {
                    room: room.clone(),
                    meetings: matching_slots(meetings, time, room, date),
                })
                .collect(),
        })
        .collect()
}

/// Hourly labels from 09:00 to 18:00.
pub fn default_time_labels() -> Vec<String> {
    (9..=18).map(|h| format!("{h:02}:00")).collect()
}
