use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use bizdesk::auth;
use bizdesk::auth::rate_limit::LoginThrottle;
use bizdesk::backend::BackendClient;
use bizdesk::config::AppConfig;
use bizdesk::handlers;
use bizdesk::upload::{CloudinaryUploader, Uploader};
use bizdesk::wizard::WizardStore;

/// Wizard and employee forms carry a photo as a base64 data URL.
const PHOTO_FORM_LIMIT: usize = 8 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    log::info!("Backend API at {}", config.api_url);
    if !config.uploads_enabled() {
        log::warn!("Cloudinary is not configured; photo uploads are disabled");
    }

    let secret_key = config.cookie_key();
    let client = web::Data::new(BackendClient::new(&config.api_url));
    let uploader: Arc<dyn Uploader> = Arc::new(CloudinaryUploader::new(
        &config.cloudinary_cloud_name,
        &config.cloudinary_upload_preset,
    ));
    let uploader = web::Data::from(uploader);
    let throttle = web::Data::new(LoginThrottle::default());
    let drafts = web::Data::new(WizardStore::default());
    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.cookie_secure;
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(client.clone())
            .app_data(uploader.clone())
            .app_data(throttle.clone())
            .app_data(drafts.clone())
            .app_data(config.clone())
            .app_data(web::FormConfig::default().limit(PHOTO_FORM_LIMIT))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public routes
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            .route("/", web::get().to(|| async { handlers::redirect("/dashboard") }))
            // Protected routes
            .service(
                web::scope("")
                    .wrap(middleware::from_fn(auth::middleware::require_auth))
                    .route("/dashboard", web::get().to(handlers::dashboard::index))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    // Meetings: fixed paths before /meetings/{id}
                    .route("/meetings", web::get().to(handlers::meeting_handlers::list))
                    .route("/meetings/calendar", web::get().to(handlers::meeting_handlers::calendar))
                    .route("/meetings/new", web::get().to(handlers::meeting_handlers::new_form))
                    .route("/meetings/new", web::post().to(handlers::meeting_handlers::create))
                    .route("/meetings/{id}/delete", web::post().to(handlers::meeting_handlers::delete))
                    .route("/api/meetings/slot", web::get().to(handlers::meeting_handlers::slot))
                    .route("/api/meetings/status", web::get().to(handlers::meeting_handlers::statuses))
                    // Tasks
                    .route("/tasks", web::get().to(handlers::task_handlers::list))
                    .route("/tasks/{id}/status", web::post().to(handlers::task_handlers::update_status))
                    .route("/tasks/{id}/progress", web::post().to(handlers::task_handlers::update_progress))
                    .route("/tasks/{id}/forward", web::post().to(handlers::task_handlers::forward))
                    // Hiring wizards
                    .route("/hire", web::get().to(handlers::hire_handlers::index))
                    .route("/hire/{kind}", web::get().to(handlers::hire_handlers::show))
                    .route("/hire/{kind}/step", web::post().to(handlers::hire_handlers::step))
                    .route("/hire/{kind}/submit", web::post().to(handlers::hire_handlers::submit))
                    .route("/hire/{kind}/cancel", web::post().to(handlers::hire_handlers::cancel))
                    // Directory
                    .route("/employees", web::get().to(handlers::directory_handlers::list))
                    .route("/employees/{id}/edit", web::get().to(handlers::directory_handlers::edit_form))
                    .route("/employees/{id}", web::post().to(handlers::directory_handlers::update))
                    .route("/candidates", web::get().to(handlers::directory_handlers::candidates))
                    .route("/payments", web::get().to(handlers::directory_handlers::payments)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
