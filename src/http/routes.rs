//! HTTP route definitions

use axum::{
    body::Bytes,
    error_handling::HandleErrorLayer,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    BoxError, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::app::{AppState, BotHandle};
use crate::bot::{TickError, TickStats};
use crate::protocol::{Action, GameState, MapState};
use crate::util::time::uptime_secs;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // A tick that misses its budget (body upload included) still answers with a batch
    let tick_budget = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(tick_budget_exceeded))
        .timeout(state.config.tick_budget);

    Router::new()
        .route("/health", get(health_handler))
        .route("/bots/:name/start", post(start_handler))
        .route("/bots/:name/tick", post(tick_handler).layer(tick_budget))
        .route("/bots/:name/end", post(end_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Health endpoint
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    bots: Vec<BotHealth>,
}

#[derive(Serialize)]
struct BotHealth {
    name: String,
    in_game: bool,
    stats: TickStats,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut bots = Vec::with_capacity(state.bots.len());
    for name in state.bots.names() {
        if let Some(handle) = state.bots.get(&name) {
            let bot = handle.lock().await;
            bots.push(BotHealth {
                name,
                in_game: bot.session_id().is_some(),
                stats: bot.stats().clone(),
            });
        }
    }

    Json(HealthResponse {
        status: "ok",
        uptime_secs: uptime_secs(),
        bots,
    })
}

// ============================================================================
// Lifecycle endpoints
// ============================================================================

async fn start_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let bot = lookup(&state, &name)?;

    let map = if body.is_empty() {
        MapState::default()
    } else {
        serde_json::from_slice::<MapState>(&body)
            .map_err(|e| AppError::BadRequest(format!("invalid map state: {}", e)))?
    };

    bot.lock().await.on_start(map);
    Ok(StatusCode::NO_CONTENT)
}

async fn tick_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Vec<Action>>, AppError> {
    let bot = lookup(&state, &name)?;

    let snapshot = match parse_snapshot(&body) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(bot = %name, error = %e, "Answering malformed snapshot with no actions");
            return Ok(Json(Vec::new()));
        }
    };

    let actions = bot.lock().await.on_tick(&snapshot);
    Ok(Json(actions))
}

async fn end_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    lookup(&state, &name)?.lock().await.on_end();
    Ok(StatusCode::NO_CONTENT)
}

async fn tick_budget_exceeded(err: BoxError) -> Json<Vec<Action>> {
    warn!(error = %err, "Tick missed its budget, answering with no actions");
    Json(Vec::new())
}

fn lookup(state: &AppState, name: &str) -> Result<BotHandle, AppError> {
    state
        .bots
        .get(name)
        .ok_or_else(|| AppError::NotFound(format!("no bot named '{}'", name)))
}

fn parse_snapshot(body: &[u8]) -> Result<GameState, TickError> {
    serde_json::from_slice(body).map_err(|e| TickError::MalformedSnapshot(e.to_string()))
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
