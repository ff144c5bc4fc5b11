//! HTTP API for FluentOps
//!
//! Endpoints:
//! - GET    /health - Health check
//! - POST   /audit - Stateless linguistic audit
//! - POST   /users/:id/audits - Audit and record into leveling history
//! - GET    /users/:id/status - Leveling status and progress
//! - GET    /users/:id/history?limit=N - Audit history, newest first
//! - GET    /users/:id/notifications - All notifications, newest first
//! - POST   /users/:id/notifications/:nid/accept - Accept a level-up
//! - POST   /users/:id/init - Initialize a user at a chosen level
//! - DELETE /users/:id - Clear all data for a user
//! - GET    /stats - System-wide counters

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::{AcceptOutcome, LevelingEngine, LevelingStatus, LinguisticAuditor, SystemStats};
use crate::types::{
    AuditHistoryEntry, AuditResult, Level, LevelUpNotification, LevelingError, PromotionReason,
};

/// App state
pub struct AppState {
    pub auditor: LinguisticAuditor,
    pub engine: LevelingEngine,
}

/// Audit request body
#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub text: String,
}

/// Record-audit response: the audit plus what it did to the user's history
#[derive(Debug, Serialize)]
pub struct RecordAuditResponse {
    pub audit: AuditResult,
    pub record: RecordSummary,
}

/// Leveling consequences of one recorded audit
#[derive(Debug, Serialize)]
pub struct RecordSummary {
    pub entry_count: usize,
    pub level_up_triggered: bool,
    pub reason: PromotionReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<LevelUpNotification>,
}

/// History response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub count: usize,
    pub audits: Vec<AuditHistoryEntry>,
}

/// History query parameters
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Notifications response
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub user_id: String,
    pub count: usize,
    pub notifications: Vec<LevelUpNotification>,
}

/// Acceptance response
#[derive(Debug, Serialize)]
pub struct AcceptResponse {
    pub message: String,
    pub old_level: Level,
    pub new_level: Level,
    pub unlocked_units: Vec<u32>,
    pub newly_unlocked: Vec<u32>,
}

/// User initialization request
#[derive(Debug, Deserialize)]
pub struct InitRequest {
    pub level: Option<Level>,
}

/// Reset response
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub user_id: String,
    pub removed: bool,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users_tracked: usize,
}

/// Error body for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        auditor: LinguisticAuditor::new(),
        engine: LevelingEngine::new(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/audit", post(run_audit))
        .route("/users/:id/audits", post(record_audit))
        .route("/users/:id/status", get(user_status))
        .route("/users/:id/history", get(user_history))
        .route("/users/:id/notifications", get(user_notifications))
        .route("/users/:id/notifications/:nid/accept", post(accept_level_up))
        .route("/users/:id/init", post(init_user))
        .route("/users/:id", delete(reset_user))
        .route("/stats", get(system_stats))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        users_tracked: state.engine.user_count(),
    })
}

/// Stateless audit: nothing is recorded
async fn run_audit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuditRequest>,
) -> Json<AuditResult> {
    Json(state.auditor.audit(&req.text))
}

/// Audit the text and record the result into the user's leveling history
async fn record_audit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AuditRequest>,
) -> Json<RecordAuditResponse> {
    let audit = state.auditor.audit(&req.text);
    let outcome = state.engine.record_audit(&id, &audit);

    Json(RecordAuditResponse {
        audit,
        record: RecordSummary {
            entry_count: outcome.entry_count,
            level_up_triggered: outcome.promotion.triggered(),
            reason: outcome.promotion.reason,
            notification: outcome.promotion.notification,
        },
    })
}

/// Leveling status for a user
async fn user_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<LevelingStatus> {
    Json(state.engine.status(&id))
}

/// Audit history, newest first
async fn user_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let audits = state.engine.history(&id, query.limit.unwrap_or(10));
    Json(HistoryResponse {
        user_id: id,
        count: audits.len(),
        audits,
    })
}

/// All notifications for a user, newest first
async fn user_notifications(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<NotificationsResponse> {
    let notifications = state.engine.notifications(&id);
    Json(NotificationsResponse {
        user_id: id,
        count: notifications.len(),
        notifications,
    })
}

/// Accept a pending level-up notification
async fn accept_level_up(
    State(state): State<Arc<AppState>>,
    Path((id, nid)): Path<(String, String)>,
) -> Result<Json<AcceptResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.engine.accept_level_up(&id, &nid) {
        Ok(outcome) => Ok(Json(accept_response(outcome))),
        Err(err) => {
            let status = match err {
                LevelingError::NotificationNotFound { .. } => StatusCode::NOT_FOUND,
                LevelingError::AlreadyAccepted { .. } => StatusCode::CONFLICT,
            };
            Err((status, Json(ErrorResponse { error: err.to_string() })))
        }
    }
}

fn accept_response(outcome: AcceptOutcome) -> AcceptResponse {
    AcceptResponse {
        message: format!(
            "🎉 Congratulations! You've been upgraded to {}!",
            outcome.new_level
        ),
        old_level: outcome.old_level,
        new_level: outcome.new_level,
        unlocked_units: outcome.unlocked_units,
        newly_unlocked: outcome.newly_unlocked,
    }
}

/// Initialize a user at a chosen level; existing users keep their level
async fn init_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<InitRequest>,
) -> Json<LevelingStatus> {
    Json(state.engine.init_user(&id, req.level.unwrap_or(Level::B1)))
}

/// Clear all data for a user
async fn reset_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ResetResponse> {
    let removed = state.engine.reset_user(&id);
    Json(ResetResponse {
        user_id: id,
        removed,
    })
}

/// System-wide counters
async fn system_stats(State(state): State<Arc<AppState>>) -> Json<SystemStats> {
    Json(state.engine.stats())
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("🎓 FluentOps API running on {}", addr);
    println!("  GET    /health                              - Health check");
    println!("  POST   /audit                               - Stateless audit");
    println!("  POST   /users/:id/audits                    - Audit and record");
    println!("  GET    /users/:id/status                    - Leveling status");
    println!("  GET    /users/:id/history                   - Audit history");
    println!("  GET    /users/:id/notifications             - Notifications");
    println!("  POST   /users/:id/notifications/:nid/accept - Accept level-up");
    println!("  POST   /users/:id/init                      - Initialize user");
    println!("  DELETE /users/:id                           - Clear user data");
    println!("  GET    /stats                               - System stats");
    axum::serve(listener, router).await?;
    Ok(())
}
