use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDateTime};

use crate::auth::session::backend_cookie;
use crate::backend::BackendClient;
use crate::errors::{AppError, render};
use crate::handlers::list_or_notice;
use crate::models::meeting::{self, Meeting};
use crate::scheduling::{StatusLabels, status};
use crate::templates_structs::{MeetingRow, MeetingsListTemplate, PageContext};

/// GET /meetings: upcoming (soonest first) and past (latest first).
pub async fn list(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/meetings")?;
    let cookie = backend_cookie(&session);
    let result = meeting::list(&client, ctx.identity.role, cookie.as_deref()).await;
    let (meetings, load_error) = list_or_notice(&session, "meetings", result)?;

    let now = Local::now().naive_local();
    let (upcoming, past) = partition(&meetings, now, &StatusLabels::default());
    render(MeetingsListTemplate {
        ctx,
        upcoming,
        past,
        load_error,
    })
}

pub fn partition(
    meetings: &[Meeting],
    now: NaiveDateTime,
    labels: &StatusLabels,
) -> (Vec<MeetingRow>, Vec<MeetingRow>) {
    let start = |m: &Meeting| status::effective_slot(m, now).and_then(|s| status::slot_start(&s));
    let (mut past, mut upcoming): (Vec<&Meeting>, Vec<&Meeting>) =
        meetings.iter().partition(|m| status::has_ended(m, now));
    upcoming.sort_by_key(|m| start(*m));
    past.sort_by_key(|m| std::cmp::Reverse(start(*m)));

    let rows = |ms: Vec<&Meeting>| -> Vec<MeetingRow> {
        ms.into_iter().map(|m| MeetingRow::build(m, now, labels)).collect()
    };
    (rows(upcoming), rows(past))
}
