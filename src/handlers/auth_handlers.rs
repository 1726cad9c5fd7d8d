use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{client_ip, redirect};
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::session::{backend_cookie, get_identity, store_identity};
use crate::auth::csrf;
use crate::backend::{BackendClient, BackendError, endpoints};
use crate::errors::{AppError, render};
use crate::models::employee::EmployeeData;
use crate::templates_structs::{APP_NAME, LoginTemplate};
use crate::validate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

fn login_form(session: &Session, email: &str, error: Option<String>) -> Result<HttpResponse, AppError> {
    render(LoginTemplate {
        error,
        app_name: APP_NAME,
        csrf_token: csrf::get_or_create_token(session),
        email: email.to_string(),
    })
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if get_identity(&session).is_some() {
        return Ok(redirect("/dashboard"));
    }
    login_form(&session, "", None)
}

pub async fn login_submit(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    throttle: web::Data<LoginThrottle>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let ip = client_ip(&req);
    if throttle.is_blocked(ip) {
        return login_form(
            &session,
            &form.email,
            Some("Too many failed sign-in attempts. Please try again later.".to_string()),
        );
    }

    let email = form.email.trim();
    if let Some(err) = validate::validate_email(email) {
        return login_form(&session, email, Some(err));
    }
    if form.password.is_empty() {
        return login_form(&session, email, Some("Password is required".to_string()));
    }

    let credentials = Credentials { email, password: &form.password };
    match client.login::<_, EmployeeData>(endpoints::LOGIN, &credentials).await {
        Ok(login) => {
            throttle.clear(ip);
            let identity = login.data.into_identity();
            log::info!("{} signed in as {}", identity.email, identity.role.label());
            session.renew();
            store_identity(&session, &identity, login.cookie.as_deref())?;
            Ok(redirect("/dashboard"))
        }
        Err(
            e @ (BackendError::Unauthorized
            | BackendError::Rejected(_)
            | BackendError::Status { status: 400..=499, .. }),
        ) => {
            throttle.record_failure(ip);
            log::info!("Sign-in rejected for {email}: {e}");
            let message = match e {
                BackendError::Unauthorized => "Invalid email or password".to_string(),
                other => other.user_message(),
            };
            login_form(&session, email, Some(message))
        }
        Err(e) => {
            log::error!("Sign-in failed: {e}");
            login_form(&session, email, Some(e.user_message()))
        }
    }
}

pub async fn logout(
    client: web::Data<BackendClient>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let cookie = backend_cookie(&session);
    if let Err(e) = client
        .send::<()>(Method::POST, endpoints::LOGOUT, None, cookie.as_deref())
        .await
    {
        log::warn!("Backend logout failed: {e}");
    }
    session.purge();
    Ok(redirect("/login"))
}
