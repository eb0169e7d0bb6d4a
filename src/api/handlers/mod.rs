use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::export::render_report;
use crate::models::*;
use crate::orchestrator::{
    CycleError, CycleStart, LabStatus, Orchestrator, PipelineSnapshot, StateError,
};
use crate::store::ImportError;

type ApiError = (StatusCode, String);

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn state_error(e: StateError) -> ApiError {
    match e {
        StateError::Busy => (StatusCode::CONFLICT, e.to_string()),
        StateError::Import(ImportError::Persistence(inner)) => internal_error(inner),
        StateError::Import(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
        StateError::Persistence(inner) => internal_error(inner),
    }
}

fn report_not_found() -> ApiError {
    (StatusCode::NOT_FOUND, "Report not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Lab
// ============================================================

pub async fn get_status(State(lab): State<Orchestrator>) -> Json<LabStatus> {
    Json(lab.status())
}

pub async fn get_pipeline(State(lab): State<Orchestrator>) -> Json<PipelineSnapshot> {
    Json(lab.pipeline())
}

pub async fn get_logs(State(lab): State<Orchestrator>) -> Json<Vec<AgentLog>> {
    Json(lab.logs())
}

#[derive(Debug, Deserialize)]
pub struct PriorityInput {
    pub subsystem: Option<SubsystemKey>,
}

pub async fn set_priority(
    State(lab): State<Orchestrator>,
    Json(input): Json<PriorityInput>,
) -> Json<LabStatus> {
    lab.set_priority(input.subsystem);
    Json(lab.status())
}

#[derive(Debug, Deserialize)]
pub struct AutonomousInput {
    pub enabled: bool,
}

pub async fn set_autonomous(
    State(lab): State<Orchestrator>,
    Json(input): Json<AutonomousInput>,
) -> Json<LabStatus> {
    lab.set_autonomous(input.enabled);
    Json(lab.status())
}

pub async fn start_cycle(
    State(lab): State<Orchestrator>,
) -> Result<(StatusCode, Json<LabStatus>), ApiError> {
    match lab.start_cycle() {
        CycleStart::Started => Ok((StatusCode::ACCEPTED, Json(lab.status()))),
        CycleStart::Busy => Err((
            StatusCode::CONFLICT,
            "A research cycle is already in progress".to_string(),
        )),
        CycleStart::CredentialsRequired => Err((
            StatusCode::PRECONDITION_REQUIRED,
            "A model API credential must be selected first".to_string(),
        )),
    }
}

pub async fn run_meta_analysis(
    State(lab): State<Orchestrator>,
) -> Result<Json<BotReport>, ApiError> {
    match lab.run_meta_analysis().await {
        Ok(report) => Ok(Json(report)),
        Err(e @ CycleError::Busy) => Err((StatusCode::CONFLICT, e.to_string())),
        Err(e @ CycleError::CredentialsRequired) => {
            Err((StatusCode::PRECONDITION_REQUIRED, e.to_string()))
        }
        Err(e) => Err((StatusCode::BAD_GATEWAY, e.to_string())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsInput {
    pub api_key: String,
}

/// Reconcile the credential gate with the key the lab holds.
pub async fn check_credentials(State(lab): State<Orchestrator>) -> Json<LabStatus> {
    lab.check_credentials();
    Json(lab.status())
}

pub async fn select_credentials(
    State(lab): State<Orchestrator>,
    Json(input): Json<CredentialsInput>,
) -> Result<Json<LabStatus>, ApiError> {
    if input.api_key.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "apiKey must not be empty".to_string()));
    }
    lab.select_credential(input.api_key);
    Ok(Json(lab.status()))
}

// ============================================================
// Knowledge
// ============================================================

pub async fn get_knowledge(State(lab): State<Orchestrator>) -> Json<RocketKnowledgeState> {
    Json(lab.knowledge())
}

pub async fn export_knowledge(
    State(lab): State<Orchestrator>,
) -> Result<impl IntoResponse, ApiError> {
    let body = lab.export_state().map_err(internal_error)?;
    let disposition = format!(
        "attachment; filename=\"mairis-prime-state-{}.json\"",
        Utc::now().timestamp_millis()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Takes the raw document so that a non-JSON upload is reported as a
/// rejected import rather than an extractor error.
pub async fn import_knowledge(
    State(lab): State<Orchestrator>,
    body: String,
) -> Result<Json<RocketKnowledgeState>, ApiError> {
    lab.import_state(&body).map(Json).map_err(state_error)
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetInput {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn reset_knowledge(
    State(lab): State<Orchestrator>,
    Json(input): Json<ResetInput>,
) -> Result<Json<RocketKnowledgeState>, ApiError> {
    if !input.confirm {
        return Err((
            StatusCode::BAD_REQUEST,
            "Reset purges all research history; send {\"confirm\": true}".to_string(),
        ));
    }
    lab.reset().map(Json).map_err(state_error)
}

// ============================================================
// Reports
// ============================================================

pub async fn list_reports(State(lab): State<Orchestrator>) -> Json<Vec<ReportSummary>> {
    Json(lab.report_summaries())
}

pub async fn get_report(
    State(lab): State<Orchestrator>,
    Path(id): Path<String>,
) -> Result<Json<ResearchReport>, ApiError> {
    lab.report(&id).map(Json).ok_or_else(report_not_found)
}

pub async fn export_report(
    State(lab): State<Orchestrator>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = lab.report(&id).ok_or_else(report_not_found)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_report(&report),
    ))
}

pub async fn get_report_code(
    State(lab): State<Orchestrator>,
    Path((id, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let report = lab.report(&id).ok_or_else(report_not_found)?;
    let file = report
        .verification_suite
        .iter()
        .flat_map(|v| v.code_lab_results.iter())
        .find(|c| c.filename == filename)
        .ok_or((StatusCode::NOT_FOUND, "Simulation file not found".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        file.code.clone(),
    ))
}
