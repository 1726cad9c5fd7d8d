// Template context structures for Askama templates, organized by page area.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{Role, SessionContext, require_identity, take_flash};
use crate::errors::AppError;

mod common;
mod dashboard;
mod directory;
mod hire;
mod meeting;
mod task;

pub use self::common::{LoginTemplate, SelectOption};
pub use self::dashboard::DashboardTemplate;
pub use self::directory::{CandidatesTemplate, EmployeeFormTemplate, EmployeeListTemplate, PaymentsTemplate};
pub use self::hire::{FieldView, HireCard, HireIndexTemplate, HireStepTemplate, StepTab};
pub use self::meeting::{
    CalendarCell, CalendarEntry, CalendarRow, MeetingCalendarTemplate, MeetingFormTemplate,
    MeetingRow, MeetingsListTemplate, time_range,
};
pub use self::task::{TaskRow, TasksTemplate, status_options};

pub const APP_NAME: &str = "BizDesk";

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Common context shared by all signed-in pages.
/// Templates access these as `ctx.identity.name`, `ctx.nav`, etc.
pub struct PageContext {
    pub identity: SessionContext,
    pub role_label: &'static str,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub nav: Vec<NavLink>,
    pub app_name: &'static str,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Result<Self, AppError> {
        let identity = require_identity(session)?;
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        Ok(Self {
            role_label: identity.role.label(),
            avatar_initial: identity.initial(),
            nav: navigation(identity.role, current_path),
            identity,
            flash,
            app_name: APP_NAME,
            csrf_token,
        })
    }
}

/// Sidebar links for `role`, with the section containing `current_path`
/// marked active.
pub fn navigation(role: Role, current_path: &str) -> Vec<NavLink> {
    let mut links: Vec<(&'static str, &'static str)> = vec![
        ("/dashboard", "Dashboard"),
        ("/meetings", "Meetings"),
        ("/meetings/calendar", "Room Calendar"),
        ("/tasks", "Tasks"),
        ("/employees", "Employees"),
    ];
    if role.can_hire() {
        links.push(("/hire", "Hiring"));
        links.push(("/candidates", "Candidates"));
    }
    if role.can_view_payments() {
        links.push(("/payments", "Payments"));
    }

    // Longest matching prefix wins so /meetings/calendar does not also
    // light up /meetings.
    let active = links
        .iter()
        .map(|(href, _)| *href)
        .filter(|href| current_path == *href || current_path.starts_with(&format!("{href}/")))
        .max_by_key(|href| href.len());

    links
        .into_iter()
        .map(|(href, label)| NavLink {
            href,
            label,
            active: Some(href) == active,
        })
        .collect()
}
