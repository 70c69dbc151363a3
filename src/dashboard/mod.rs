//! Dashboard — Axum web server for the live threat monitor.
//!
//! Serves a JSON API over the session and a self-contained HTML page that
//! polls it. CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use routes::AppState;

/// The embedded dashboard HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Bind the dashboard port and serve it on a background task.
///
/// Returns the bound address once the listener is up.
pub async fn spawn_dashboard(state: AppState, port: u16) -> Result<SocketAddr> {
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    let local_addr = listener.local_addr()?;
    info!(port = local_addr.port(), "Dashboard listening on http://localhost:{}", local_addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!(error = %e, "Dashboard server error");
        }
    });

    Ok(local_addr)
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("*"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Read API
        .route("/api/status", get(routes::get_status))
        .route("/api/metrics", get(routes::get_metrics))
        .route("/api/ledger", get(routes::get_ledger))
        .route("/api/attack-series", get(routes::get_attack_series))
        .route("/api/map", get(routes::get_map))
        .route("/api/notifications", get(routes::get_notifications))
        .route("/api/catalog", get(routes::get_catalog))
        // Controls
        .route("/api/attack", post(routes::launch_attack))
        .route("/api/auto-mode", post(routes::set_auto_mode))
        .route("/health", get(routes::health))
        // Dashboard HTML
        .route("/", get(serve_dashboard))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML dashboard.
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
