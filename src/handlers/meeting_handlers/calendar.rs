use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};

use super::forms::CalendarQuery;
use crate::auth::session::backend_cookie;
use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::list_or_notice;
use crate::models::meeting;
use crate::scheduling::{day_grid, default_time_labels, parse_date};
use crate::templates_structs::{CalendarRow, MeetingCalendarTemplate, PageContext};

/// GET /meetings/calendar?date=YYYY-MM-DD: one day of the room grid.
/// A missing or unreadable date shows today.
pub async fn calendar(
    client: web::Data<BackendClient>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/meetings/calendar")?;
    let day = query
        .date
        .as_deref()
        .and_then(parse_date)
        .unwrap_or_else(|| Local::now().date_naive());

    let cookie = backend_cookie(&session);
    let result = meeting::list(&client, ctx.identity.role, cookie.as_deref()).await;
    let (meetings, load_error) = list_or_notice(&session, "meetings", result)?;

    let date = day.format("%Y-%m-%d").to_string();
    let rows = day_grid(&meetings, &date, &config.meeting_rooms, &default_time_labels());

    render(MeetingCalendarTemplate {
        ctx,
        date_label: day.format("%A, %B %-d, %Y").to_string(),
        prev_date: shift(day, -1),
        next_date: shift(day, 1),
        rooms: config.meeting_rooms.clone(),
        rows: CalendarRow::from_grid(rows),
        date,
        load_error,
    })
}

fn shift(day: NaiveDate, days: i64) -> String {
    day.checked_add_signed(chrono::Duration::days(days))
        .unwrap_or(day)
        .format("%Y-%m-%d")
        .to_string()
}
