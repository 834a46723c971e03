//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`;
//! each mutating request holds the session write lock for exactly one
//! operation, so a reset is never observed half-done.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::engine::{parse_outcomes, Session, SessionSnapshot};
use crate::strategy::{DAlembertProgression, MetaAdvisor, Suggestion};
use crate::types::{BakuraError, BetResult, Outcome};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub session: RwLock<Session>,
    pub dalembert: RwLock<DAlembertProgression>,
    pub advisor: MetaAdvisor,
}

impl DashboardState {
    pub fn new(session: Session, dalembert: DAlembertProgression, advisor: MetaAdvisor) -> Self {
        Self {
            session: RwLock::new(session),
            dalembert: RwLock::new(dalembert),
            advisor,
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HandRequest {
    pub outcome: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandsRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitRequest {
    pub unit: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultRequest {
    pub result: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DAlembertResetRequest {
    #[serde(default)]
    pub unit: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every rejected request surfaces as `400 Bad Request` with an
/// [`ErrorResponse`] body.
#[derive(Debug)]
pub enum ApiError {
    /// Well-formed request the domain refused.
    Domain(BakuraError),
    /// Body missing, not JSON, or the wrong shape.
    Malformed(String),
}

impl From<BakuraError> for ApiError {
    fn from(err: BakuraError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Domain(err) => err.to_string(),
            ApiError::Malformed(detail) => format!("Malformed request: {detail}"),
        };
        warn!(error = %message, "Rejected request");
        let body = Json(ErrorResponse { error: message });
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Session routes
// ---------------------------------------------------------------------------

/// GET /api/snapshot
pub async fn get_snapshot(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.read().await;
    Json(session.snapshot())
}

/// POST /api/hand
pub async fn post_hand(
    State(state): State<AppState>,
    payload: Result<Json<HandRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(req) = payload?;
    let outcome: Outcome = req.outcome.parse()?;
    let mut session = state.session.write().await;
    session.add_hand(outcome);
    Ok(Json(session.snapshot()))
}

/// POST /api/hands
///
/// Pasted board text. Applied only if every token parses.
pub async fn post_hands(
    State(state): State<AppState>,
    payload: Result<Json<HandsRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(req) = payload?;
    let outcomes = parse_outcomes(&req.text)?;
    let mut session = state.session.write().await;
    session.add_hands(&outcomes);
    Ok(Json(session.snapshot()))
}

/// POST /api/reset
pub async fn post_reset(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut session = state.session.write().await;
    session.reset();
    Json(session.snapshot())
}

/// PUT /api/unit
pub async fn put_unit(
    State(state): State<AppState>,
    payload: Result<Json<UnitRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(req) = payload?;
    let mut session = state.session.write().await;
    session.set_unit(req.unit)?;
    Ok(Json(session.snapshot()))
}

/// GET /api/suggestion
pub async fn get_suggestion(State(state): State<AppState>) -> Json<Option<Suggestion>> {
    let snapshot = state.session.read().await.snapshot();
    Json(state.advisor.suggest(&snapshot.bettors))
}

// ---------------------------------------------------------------------------
// D'Alembert routes
// ---------------------------------------------------------------------------

/// GET /api/dalembert
pub async fn get_dalembert(State(state): State<AppState>) -> Json<DAlembertProgression> {
    Json(state.dalembert.read().await.clone())
}

/// POST /api/dalembert/hand
pub async fn post_dalembert_hand(
    State(state): State<AppState>,
    payload: Result<Json<ResultRequest>, JsonRejection>,
) -> Result<Json<DAlembertProgression>, ApiError> {
    let Json(req) = payload?;
    let result: BetResult = req.result.parse()?;
    let mut progression = state.dalembert.write().await;
    progression.record(result);
    Ok(Json(progression.clone()))
}

/// POST /api/dalembert/reset, optionally with a new base unit. An empty
/// body keeps the current unit.
pub async fn post_dalembert_reset(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DAlembertProgression>, ApiError> {
    let req: DAlembertResetRequest = if body.iter().all(u8::is_ascii_whitespace) {
        DAlembertResetRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))?
    };
    let mut progression = state.dalembert.write().await;
    match req.unit {
        Some(unit) => *progression = DAlembertProgression::new(unit)?,
        None => progression.reset(),
    }
    Ok(Json(progression.clone()))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
