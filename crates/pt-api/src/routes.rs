//! API routes

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::extractors::AppState;
use crate::handlers::{dashboard, entries, logs, off_days, session, sync, users};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_root))
        .route(
            "/session",
            get(session::current)
                .post(session::login)
                .delete(session::logout),
        )
        .route("/site", get(dashboard::site))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/export", get(dashboard::export))
        .route("/batch-number", get(entries::batch_number))
        .nest("/entries", entries_router())
        .nest("/off-days", off_days_router())
        .nest("/users", users_router())
        .route("/logs", get(logs::list_logs))
        .route("/sync", post(sync::sync))
        .route("/remote", get(sync::remote_status).put(sync::set_remote))
}

fn entries_router() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::list_entries).post(entries::create_plan))
        .route("/:id", put(entries::edit_entry).delete(entries::delete_entry))
        .route("/:id/actual", put(entries::record_actual))
}

fn off_days_router() -> Router<AppState> {
    Router::new()
        .route("/", get(off_days::list_off_days).post(off_days::add_off_day))
        .route(
            "/:date",
            get(off_days::check_off_day).delete(off_days::remove_off_day),
        )
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/me/password", post(users::change_password))
        .route("/:id", delete(users::delete_user))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn api_root() -> Json<Value> {
    Json(json!({
        "_type": "Root",
        "instanceName": "prodtrack",
        "_links": {
            "session": { "href": "/api/session" },
            "dashboard": { "href": "/api/dashboard" },
            "entries": { "href": "/api/entries" },
            "offDays": { "href": "/api/off-days" },
            "users": { "href": "/api/users" },
            "logs": { "href": "/api/logs" },
            "sync": { "href": "/api/sync" },
            "remote": { "href": "/api/remote" }
        }
    }))
}
