pub mod auth;
pub mod diagnostics;
pub mod entries;
pub mod feeds;
pub mod forms;
pub mod ingest;
pub mod logs;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        // Forms
        .route("/api/v1/forms", get(forms::list).post(forms::create))
        .route(
            "/api/v1/forms/{id}",
            get(forms::get).put(forms::update).delete(forms::delete),
        )
        // Feeds
        .route(
            "/api/v1/forms/{id}/feeds",
            get(feeds::list_by_form).post(feeds::create),
        )
        .route(
            "/api/v1/feeds/{id}",
            get(feeds::get).put(feeds::update).delete(feeds::delete),
        )
        // Entries
        .route("/api/v1/forms/{id}/entries", get(entries::list))
        .route("/api/v1/entries/{id}", get(entries::get))
        .route("/api/v1/entries/{id}/payload", get(entries::payload))
        .route("/api/v1/entries/{id}/resend", post(entries::resend))
        // Delivery log
        .route("/api/v1/logs", get(logs::list))
        // Mapper settings
        .route(
            "/api/v1/settings/mapper",
            get(settings::get).put(settings::update),
        )
        // Diagnostics
        .route("/api/v1/diagnostics", get(diagnostics::report))
        .route("/api/v1/diagnostics/repair", post(diagnostics::repair))
}

pub fn ingest_routes() -> Router<SharedState> {
    Router::new().route("/v1/f/{form_id}", post(ingest::ingest))
}
