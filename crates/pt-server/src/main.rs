//! prodtrack server
//!
//! Serves the production tracking API over a file-backed record store,
//! optionally mirrored to a spreadsheet endpoint.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pt_api::AppState;
use pt_core::config::AppConfig;
use pt_remote::SheetsClient;
use pt_store::{FileCache, RecordStore, StoreOptions};

mod events;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        data_dir = %config.store.data_dir,
        "Starting prodtrack"
    );

    let store = Arc::new(build_store(&config)?);
    match store.remote().active_url() {
        Some(url) => info!(%url, "Remote sync enabled"),
        None => info!("Remote sync disabled, running local-only"),
    }
    events::spawn_event_logger(store.subscribe());

    let app = build_router(AppState::new(store));

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,pt_server=debug,pt_api=debug,tower_http=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

fn build_store(config: &AppConfig) -> anyhow::Result<RecordStore> {
    let cache = FileCache::open(&config.store.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.store.data_dir))?;
    let remote = SheetsClient::new(&config.remote).context("Failed to build remote client")?;
    let store = RecordStore::new(
        Arc::new(cache),
        Arc::new(remote),
        StoreOptions::from_config(config),
    )?;
    Ok(store)
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    pt_api::router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    )
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_config(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.store.data_dir = dir.display().to_string();
        config
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let store = build_store(&test_config(dir.path())).unwrap();
        let app = build_router(AppState::new(Arc::new(store)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_store_seeds_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = build_store(&test_config(dir.path())).unwrap();

        assert_eq!(store.users().unwrap()[0].username, "admin");
        assert!(!store.remote().is_enabled());
        assert!(dir.path().join("users.json").exists());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let dir = tempfile::tempdir().unwrap();
        let store = build_store(&test_config(dir.path())).unwrap();
        let app = build_router(AppState::new(Arc::new(store)));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/session")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
