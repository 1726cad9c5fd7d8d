use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;

use super::forms::SlotQuery;
use crate::auth::session::{backend_cookie, require_identity};
use crate::backend::BackendClient;
use crate::errors::AppError;
use crate::handlers::backend_failure;
use crate::models::meeting::{self, Meeting};
use crate::scheduling::{StatusBadge, StatusLabels, classify_meeting, matching_slots, parse_date, parse_hhmm};
use crate::templates_structs::time_range;

#[derive(Serialize)]
struct SlotMeeting<'a> {
    id: &'a str,
    title: &'a str,
    platform: &'a str,
    time_range: String,
    google_meet_link: Option<&'a str>,
}

#[derive(Serialize)]
struct MeetingBadge<'a> {
    id: &'a str,
    #[serde(flatten)]
    badge: StatusBadge,
}

fn json_error(status: actix_web::http::StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("application/json")
        .body(serde_json::json!({"ok": false, "error": message}).to_string())
}

async fn load(client: &BackendClient, session: &Session) -> Result<Vec<Meeting>, AppError> {
    let identity = require_identity(session)?;
    let cookie = backend_cookie(session);
    meeting::list(client, identity.role, cookie.as_deref())
        .await
        .map_err(|e| backend_failure(session, e))
}

/// GET /api/meetings/slot?date=YYYY-MM-DD&time=HH:MM&room=...
/// Meetings shown in one calendar cell.
pub async fn slot(
    client: web::Data<BackendClient>,
    session: Session,
    query: web::Query<SlotQuery>,
) -> Result<HttpResponse, AppError> {
    if parse_date(&query.date).is_none() || parse_hhmm(&query.time).is_none() {
        return Ok(json_error(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Expected date=YYYY-MM-DD and time=HH:MM",
        ));
    }
    let meetings = load(&client, &session).await?;
    let found: Vec<SlotMeeting> = matching_slots(&meetings, &query.time, &query.room, &query.date)
        .into_iter()
        .map(|(m, slot)| SlotMeeting {
            id: &m.id,
            title: &m.title,
            platform: &m.platform,
            time_range: time_range(slot.start_time, slot.end_time),
            google_meet_link: m.google_meet_link.as_deref().filter(|l| !l.trim().is_empty()),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({"ok": true, "meetings": found})))
}

/// GET /api/meetings/status: current badge for every visible meeting, so
/// open pages can refresh them without reloading.
pub async fn statuses(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let meetings = load(&client, &session).await?;
    let now = Local::now().naive_local();
    let labels = StatusLabels::default();
    let badges: Vec<MeetingBadge> = meetings
        .iter()
        .map(|m| MeetingBadge {
            id: &m.id,
            badge: classify_meeting(m, now, &labels),
        })
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({"ok": true, "meetings": badges})))
}
