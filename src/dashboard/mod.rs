//! Dashboard — Axum web server hosting the tracker.
//!
//! Serves a JSON API over the shared session and a self-contained HTML
//! page with the Banker / Player / Tie buttons. CORS enabled for local
//! development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::Html,
    routing::{get, post, put},
    Router,
};
use std::future::Future;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use routes::{AppState, DashboardState};

/// The embedded dashboard HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Serve the dashboard until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dashboard server error")?;

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Session
        .route("/api/snapshot", get(routes::get_snapshot))
        .route("/api/hand", post(routes::post_hand))
        .route("/api/hands", post(routes::post_hands))
        .route("/api/reset", post(routes::post_reset))
        .route("/api/unit", put(routes::put_unit))
        .route("/api/suggestion", get(routes::get_suggestion))
        // D'Alembert
        .route("/api/dalembert", get(routes::get_dalembert))
        .route("/api/dalembert/hand", post(routes::post_dalembert_hand))
        .route("/api/dalembert/reset", post(routes::post_dalembert_reset))
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
