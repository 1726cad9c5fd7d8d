//! Hiring wizards. Each POST applies the submitted step, stores the draft in
//! the [`WizardStore`] under the session's draft owner and redirects back to
//! the step page.

use std::collections::HashMap;

use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::{backend_failure, redirect};
use crate::auth::csrf;
use crate::auth::session::{SessionContext, backend_cookie, draft_owner, require_identity, set_flash};
use crate::backend::{BackendClient, BackendError};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::templates_structs::{HireCard, HireIndexTemplate, HireStepTemplate, PageContext};
use crate::upload::Uploader;
use crate::wizard::{HireKind, InputKind, SubmitOutcome, Wizard, WizardStore};

/// Hidden input carrying the photo picked in the browser as a data URL.
const PHOTO_DATA_FIELD: &str = "photo_data";

fn require_hiring(session: &Session) -> Result<SessionContext, AppError> {
    let identity = require_identity(session)?;
    if identity.role.can_hire() {
        Ok(identity)
    } else {
        Err(AppError::PermissionDenied(identity.role.label().to_string()))
    }
}

fn kind_from_path(slug: &str) -> Result<HireKind, AppError> {
    HireKind::from_slug(slug).ok_or(AppError::NotFound)
}

fn step_url(kind: HireKind) -> String {
    format!("/hire/{}", kind.slug())
}

/// Store the posted values for the current step and upload a newly picked
/// photo, if any.
async fn apply_input(wizard: &mut Wizard<'_>, uploader: &dyn Uploader, form: &HashMap<String, String>) {
    wizard.set_input(form.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let Some(data_url) = form.get(PHOTO_DATA_FIELD).filter(|v| !v.trim().is_empty()) else {
        return;
    };
    let photo_field = wizard
        .current()
        .fields
        .iter()
        .find(|f| f.kind == InputKind::Photo)
        .map(|f| f.name);
    if let Some(field) = photo_field {
        wizard.attach_photo(uploader, field, data_url).await;
    }
}

/// GET /hire
pub async fn index(store: web::Data<WizardStore>, session: Session) -> Result<HttpResponse, AppError> {
    require_hiring(&session)?;
    let owner = draft_owner(&session)?;
    let ctx = PageContext::build(&session, "/hire")?;
    let cards = HireKind::ALL
        .into_iter()
        .map(|kind| HireCard::build(kind, store.get(&owner, kind).is_some()))
        .collect();
    render(HireIndexTemplate { ctx, cards })
}

/// GET /hire/{kind}
pub async fn show(
    config: web::Data<AppConfig>,
    store: web::Data<WizardStore>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_hiring(&session)?;
    let kind = kind_from_path(&path)?;
    let owner = draft_owner(&session)?;
    let ctx = PageContext::build(&session, "/hire")?;
    let state = store.get(&owner, kind).unwrap_or_default();
    let wizard = Wizard::resume(kind.schema(), state);
    render(HireStepTemplate::build(ctx, &wizard, config.uploads_enabled()))
}

/// POST /hire/{kind}/step with `action=next` or `action=prev`.
pub async fn step(
    uploader: web::Data<dyn Uploader>,
    store: web::Data<WizardStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, form.get("csrf_token").map(String::as_str).unwrap_or(""))?;
    require_hiring(&session)?;
    let kind = kind_from_path(&path)?;
    let owner = draft_owner(&session)?;

    let state = store.get(&owner, kind).unwrap_or_default();
    let mut wizard = Wizard::resume(kind.schema(), state);
    apply_input(&mut wizard, &**uploader, &form).await;

    match form.get("action").map(String::as_str) {
        Some("prev") => wizard.prev(),
        _ => {
            wizard.next();
        }
    }
    store.put(&owner, kind, wizard.state().clone());
    Ok(redirect(&step_url(kind)))
}

/// POST /hire/{kind}/submit
pub async fn submit(
    client: web::Data<BackendClient>,
    uploader: web::Data<dyn Uploader>,
    store: web::Data<WizardStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, form.get("csrf_token").map(String::as_str).unwrap_or(""))?;
    let identity = require_hiring(&session)?;
    let kind = kind_from_path(&path)?;
    let owner = draft_owner(&session)?;

    let state = store.get(&owner, kind).unwrap_or_default();
    let mut wizard = Wizard::resume(kind.schema(), state);
    apply_input(&mut wizard, &**uploader, &form).await;

    let cookie = backend_cookie(&session);
    match wizard.submit(&client, cookie.as_deref()).await {
        SubmitOutcome::Submitted(message) => {
            log::info!("{} completed the {} hire wizard", identity.email, kind.slug());
            store.remove(&owner, kind);
            let text = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("{} submitted", kind.schema().title));
            set_flash(&session, &text);
            Ok(redirect("/hire"))
        }
        SubmitOutcome::Invalid => {
            store.put(&owner, kind, wizard.state().clone());
            Ok(redirect(&step_url(kind)))
        }
        SubmitOutcome::Failed(BackendError::Unauthorized) => {
            Err(backend_failure(&session, BackendError::Unauthorized))
        }
        SubmitOutcome::Failed(_) => {
            store.put(&owner, kind, wizard.state().clone());
            Ok(redirect(&step_url(kind)))
        }
    }
}

/// POST /hire/{kind}/cancel
pub async fn cancel(
    store: web::Data<WizardStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, form.get("csrf_token").map(String::as_str).unwrap_or(""))?;
    require_hiring(&session)?;
    let kind = kind_from_path(&path)?;
    store.remove(&draft_owner(&session)?, kind);
    set_flash(&session, &format!("{} cancelled", kind.schema().title));
    Ok(redirect("/hire"))
}
