use askama::Template;

use super::{MeetingRow, PageContext, TaskRow};
use crate::models::task::TaskCounts;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    /// Live, starting soon or later today.
    pub today: Vec<MeetingRow>,
    pub upcoming: Vec<MeetingRow>,
    pub counts: TaskCounts,
    pub recent_tasks: Vec<TaskRow>,
}
