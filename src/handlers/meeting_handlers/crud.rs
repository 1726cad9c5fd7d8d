use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::forms::{CsrfOnly, MeetingForm, PLATFORMS};
use crate::auth::csrf;
use crate::auth::session::{backend_cookie, require_identity};
use crate::backend::{BackendClient, BackendError};
use crate::errors::{AppError, render};
use crate::handlers::{backend_failure, flash_outcome};
use crate::models::meeting;
use crate::templates_structs::{MeetingFormTemplate, PageContext, SelectOption};

fn form_page(session: &Session, form: MeetingForm, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "/meetings/new")?;
    let platforms = SelectOption::list(PLATFORMS.iter().map(|p| (*p, *p)), &form.platform);
    render(MeetingFormTemplate {
        ctx,
        form,
        platforms,
        errors,
    })
}

/// GET /meetings/new
pub async fn new_form(session: Session) -> Result<HttpResponse, AppError> {
    let form = MeetingForm {
        platform: PLATFORMS[0].to_string(),
        ..MeetingForm::default()
    };
    form_page(&session, form, Vec::new())
}

/// POST /meetings/new
pub async fn create(
    client: web::Data<BackendClient>,
    session: Session,
    form: web::Form<MeetingForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_identity(&session)?;
    let form = form.into_inner();

    let payload = match form.to_payload() {
        Ok(p) => p,
        Err(errors) => return form_page(&session, form, errors),
    };

    let cookie = backend_cookie(&session);
    match meeting::create(&client, identity.role, cookie.as_deref(), &payload).await {
        Ok(message) => flash_outcome(&session, Ok(message), "Meeting scheduled", "/meetings"),
        Err(e @ BackendError::Unauthorized) => Err(backend_failure(&session, e)),
        Err(e) => {
            log::error!("Creating meeting failed: {e}");
            form_page(&session, form, vec![e.user_message()])
        }
    }
}

/// POST /meetings/{id}/delete
pub async fn delete(
    client: web::Data<BackendClient>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_identity(&session)?;
    let id = path.into_inner();
    let cookie = backend_cookie(&session);

    let result = meeting::delete(&client, identity.role, cookie.as_deref(), &id).await;
    flash_outcome(&session, result, "Meeting deleted", "/meetings")
}
