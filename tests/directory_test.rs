//! Employee edits through the real handler, with the backend mocked.

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, test, web};
use mockito::Matcher;
use serde_json::json;

use bizdesk::auth::csrf;
use bizdesk::auth::session::{Role, SessionContext, store_identity};
use bizdesk::backend::BackendClient;
use bizdesk::errors::AppError;
use bizdesk::handlers;
use bizdesk::upload::{MemoryUploader, Uploader};

mod common;
use common::ok_envelope;

/// Signs in as HR and returns the CSRF token as the body.
async fn sign_in(session: Session) -> Result<HttpResponse, AppError> {
    let identity = SessionContext {
        employee_id: "e1".to_string(),
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        role: Role::Hr,
        department: String::new(),
    };
    store_identity(&session, &identity, Some("token=abc"))?;
    Ok(HttpResponse::Ok().body(csrf::get_or_create_token(&session)))
}

#[actix_rt::test]
async fn test_update_keeps_the_stored_photo() {
    let mut server = mockito::Server::new_async().await;
    let _find = server
        .mock("GET", "/api/hr/employees/42")
        .with_body(ok_envelope(json!({
            "_id": "42",
            "name": "Ravi",
            "photo": "https://res.cloudinary.com/demo/ravi.png"
        })))
        .create_async()
        .await;
    let replace = server
        .mock("PUT", "/api/hr/employees/42")
        .match_body(Matcher::PartialJson(json!({
            "name": "Ravi Kumar",
            "photo": "https://res.cloudinary.com/demo/ravi.png"
        })))
        .with_body(ok_envelope(json!(null)))
        .expect(1)
        .create_async()
        .await;

    let uploader: std::sync::Arc<dyn Uploader> = std::sync::Arc::new(MemoryUploader::default());
    let app = test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(BackendClient::new(&server.url())))
            .app_data(web::Data::from(uploader))
            .route("/sign-in", web::get().to(sign_in))
            .route("/employees/{id}", web::post().to(handlers::directory_handlers::update)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/sign-in").to_request()).await;
    let cookie: Cookie<'static> = resp
        .response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
        .expect("session cookie");
    let csrf = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    let req = test::TestRequest::post()
        .uri("/employees/42")
        .cookie(cookie)
        .set_form([
            ("csrf_token", csrf.as_str()),
            ("name", "Ravi Kumar"),
            ("email", "ravi@example.com"),
            ("phone", "9876543210"),
            ("department", "Sales"),
            ("designation", "Sales Executive"),
            ("salary", "42000"),
            ("status", "active"),
            ("photo", "https://evil.example/x.png"),
            ("photo_data", ""),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/employees")
    );
    replace.assert_async().await;
}
