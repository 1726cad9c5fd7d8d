use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const IDENTITY_KEY: &str = "identity";
const BACKEND_COOKIE_KEY: &str = "backend_cookie";
const FLASH_KEY: &str = "flash";
const DRAFT_OWNER_KEY: &str = "draft_owner";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[serde(alias = "CEO")]
    Ceo,
    #[serde(alias = "HR")]
    Hr,
    #[serde(alias = "tl", alias = "teamleader")]
    TeamLeader,
    #[serde(alias = "pm")]
    ProjectManager,
}

impl Role {
    /// Path segment the backend uses for this role's endpoints.
    pub fn api_segment(self) -> &'static str {
        match self {
            Role::Ceo => "ceo",
            Role::Hr => "hr",
            Role::TeamLeader => "tl",
            Role::ProjectManager => "project-manager",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Ceo => "CEO",
            Role::Hr => "HR",
            Role::TeamLeader => "Team Leader",
            Role::ProjectManager => "Project Manager",
        }
    }

    pub fn can_hire(self) -> bool {
        matches!(self, Role::Ceo | Role::Hr)
    }

    pub fn can_view_payments(self) -> bool {
        self == Role::Ceo
    }
}

/// Who is signed in. Written once at login, read by every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department: String,
}

impl SessionContext {
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

pub fn store_identity(
    session: &Session,
    identity: &SessionContext,
    backend_cookie: Option<&str>,
) -> Result<(), AppError> {
    session
        .insert(IDENTITY_KEY, identity)
        .map_err(|e| AppError::Session(format!("Failed to store identity: {e}")))?;
    if let Some(cookie) = backend_cookie {
        session
            .insert(BACKEND_COOKIE_KEY, cookie)
            .map_err(|e| AppError::Session(format!("Failed to store backend cookie: {e}")))?;
    }
    Ok(())
}

pub fn get_identity(session: &Session) -> Option<SessionContext> {
    session.get::<SessionContext>(IDENTITY_KEY).unwrap_or(None)
}

pub fn require_identity(session: &Session) -> Result<SessionContext, AppError> {
    get_identity(session).ok_or_else(|| AppError::Session("Not signed in".to_string()))
}

pub fn backend_cookie(session: &Session) -> Option<String> {
    session.get::<String>(BACKEND_COOKIE_KEY).unwrap_or(None)
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// Opaque token naming this session's wizard drafts, created on first use.
pub fn draft_owner(session: &Session) -> Result<String, AppError> {
    if let Ok(Some(owner)) = session.get::<String>(DRAFT_OWNER_KEY) {
        return Ok(owner);
    }
    let owner = crate::auth::csrf::generate_token();
    session
        .insert(DRAFT_OWNER_KEY, &owner)
        .map_err(|e| AppError::Session(format!("Failed to store draft owner: {e}")))?;
    Ok(owner)
}

/// Check the signed-in role; returns Err(AppError) if it is not allowed.
pub fn require_role(session: &Session, allowed: &[Role]) -> Result<SessionContext, AppError> {
    let identity = require_identity(session)?;
    if allowed.contains(&identity.role) {
        Ok(identity)
    } else {
        Err(AppError::PermissionDenied(identity.role.label().to_string()))
    }
}
