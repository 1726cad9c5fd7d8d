use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDateTime, Timelike};

use crate::auth::session::backend_cookie;
use crate::backend::{BackendClient, endpoints};
use crate::errors::{AppError, render};
use crate::models::meeting::Meeting;
use crate::models::task::{Task, TaskCounts};
use crate::scheduling::{MeetingStatus, StatusLabels, classify_meeting, status};
use crate::templates_structs::{DashboardTemplate, MeetingRow, PageContext, TaskRow};

const UPCOMING_LIMIT: usize = 5;
const RECENT_TASKS_LIMIT: usize = 5;

fn time_greeting(name: &str, hour: u32) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

pub async fn index(
    client: web::Data<BackendClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/dashboard")?;
    let role = ctx.identity.role;
    let cookie = backend_cookie(&session);

    let meetings_path = endpoints::meetings(role);
    let tasks_path = endpoints::tasks(role);
    let (meetings, tasks) = tokio::join!(
        client.get_list_or_empty::<Meeting>(&meetings_path, cookie.as_deref()),
        client.get_list_or_empty::<Task>(&tasks_path, cookie.as_deref()),
    );

    let now = Local::now().naive_local();
    let (today, upcoming) = split_meetings(&meetings, now, &StatusLabels::default());

    let tmpl = DashboardTemplate {
        greeting: time_greeting(&ctx.identity.name, now.hour()),
        ctx,
        today,
        upcoming,
        counts: TaskCounts::tally(&tasks),
        recent_tasks: tasks.iter().take(RECENT_TASKS_LIMIT).map(TaskRow::build).collect(),
    };
    render(tmpl)
}

/// Today's meetings (live first) and the next few on later days.
fn split_meetings(
    meetings: &[Meeting],
    now: NaiveDateTime,
    labels: &StatusLabels,
) -> (Vec<MeetingRow>, Vec<MeetingRow>) {
    let mut active: Vec<&Meeting> = meetings
        .iter()
        .filter(|m| !status::has_ended(m, now))
        .collect();
    active.sort_by_key(|m| status::effective_slot(m, now).and_then(|s| status::slot_start(&s)));

    let mut today = Vec::new();
    let mut upcoming = Vec::new();
    for meeting in active {
        match classify_meeting(meeting, now, labels).status {
            MeetingStatus::LiveNow | MeetingStatus::StartingSoon | MeetingStatus::Today => {
                today.push(MeetingRow::build(meeting, now, labels));
            }
            MeetingStatus::Tomorrow | MeetingStatus::OnDate if upcoming.len() < UPCOMING_LIMIT => {
                upcoming.push(MeetingRow::build(meeting, now, labels));
            }
            _ => {}
        }
    }
    today.sort_by_key(|row| row.badge_class != "badge badge-destructive");
    (today, upcoming)
}
