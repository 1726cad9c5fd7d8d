pub mod auth_handlers;
pub mod dashboard;
pub mod directory_handlers;
pub mod hire_handlers;
pub mod meeting_handlers;
pub mod task_handlers;

use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse};

use crate::backend::BackendError;
use crate::errors::AppError;

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

/// Convert a backend failure into an `AppError`. A rejected backend session
/// purges ours so the redirect to `/login` starts clean.
pub fn backend_failure(session: &Session, err: BackendError) -> AppError {
    if matches!(err, BackendError::Unauthorized) {
        session.purge();
    }
    AppError::Backend(err)
}

/// A list for a page body. Expired sessions still fail; any other error is
/// logged and shown as an inline notice over an empty list.
pub fn list_or_notice<T>(
    session: &Session,
    what: &str,
    result: Result<Vec<T>, BackendError>,
) -> Result<(Vec<T>, Option<String>), AppError> {
    match result {
        Ok(items) => Ok((items, None)),
        Err(BackendError::Unauthorized) => Err(backend_failure(session, BackendError::Unauthorized)),
        Err(e) => {
            log::warn!("Loading {what} failed: {e}");
            Ok((Vec::new(), Some(format!("Could not load {what}: {}", e.user_message()))))
        }
    }
}

/// Flash the outcome of a mutation and redirect. Backend failures become
/// the flash text instead of an error page.
pub fn flash_outcome(
    session: &Session,
    result: Result<Option<String>, BackendError>,
    success: &str,
    location: &str,
) -> Result<HttpResponse, AppError> {
    match result {
        Ok(message) => {
            let text = message.filter(|m| !m.trim().is_empty());
            crate::auth::session::set_flash(session, text.as_deref().unwrap_or(success));
        }
        Err(BackendError::Unauthorized) => {
            return Err(backend_failure(session, BackendError::Unauthorized));
        }
        Err(e) => {
            log::error!("{e}");
            crate::auth::session::set_flash(session, &e.user_message());
        }
    }
    Ok(redirect(location))
}

pub fn client_ip(req: &HttpRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
