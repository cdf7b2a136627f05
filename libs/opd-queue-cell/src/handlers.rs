use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{error, info};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::{
    services::{report, AppointmentRegistry},
    NameSearchQuery, OpdError, RegisterPatientRequest, TokenId,
};

/// Router state. The registry is single-actor, so every handler holds the
/// lock for the whole registry call.
pub struct OpdState {
    pub config: Arc<AppConfig>,
    pub registry: Mutex<AppointmentRegistry>,
}

impl OpdState {
    pub fn new(config: Arc<AppConfig>, registry: AppointmentRegistry) -> Self {
        Self {
            config,
            registry: Mutex::new(registry),
        }
    }

    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, OpdError> {
        let registry = AppointmentRegistry::from_config(&config)?;
        Ok(Self::new(config, registry))
    }
}

fn parse_token(raw: &str) -> Result<TokenId, AppError> {
    raw.parse::<TokenId>().map_err(AppError::from)
}

/// List the configured doctors
pub async fn list_doctors(State(state): State<Arc<OpdState>>) -> Result<Json<Value>, AppError> {
    let registry = state.registry.lock().await;
    let doctors = registry.doctors();

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

/// Register a patient with a doctor and hand out a queue token
pub async fn register_patient(
    State(state): State<Arc<OpdState>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    info!("Registration request for doctor {}", request.doctor_id);

    let age = u32::try_from(request.age)
        .map_err(|_| OpdError::invalid_input("age", request.age.to_string()))?;

    let receipt = state.registry.lock().await.register_patient(
        &request.name,
        age,
        request.doctor_id,
        request.emergency,
    )?;

    Ok(Json(json!({
        "success": true,
        "message": report::render_registration(&receipt),
        "receipt": receipt
    })))
}

/// Search patients by part of their name
pub async fn search_patients(
    State(state): State<Arc<OpdState>>,
    Query(query): Query<NameSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let results = state.registry.lock().await.find_by_name(&query.name)?;

    Ok(Json(json!({
        "patients": results,
        "total": results.len()
    })))
}

/// Look up one appointment by token
pub async fn get_patient(
    State(state): State<Arc<OpdState>>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_token(&token)?;
    let patient = state.registry.lock().await.find_by_token(token)?;

    Ok(Json(json!(patient)))
}

/// Mark a waiting patient as consulted
pub async fn mark_consulted(
    State(state): State<Arc<OpdState>>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_token(&token)?;
    info!("Consultation completion request for token {}", token);

    let receipt = state.registry.lock().await.mark_consulted(token)?;

    Ok(Json(json!({
        "success": true,
        "message": report::render_consultation(&receipt),
        "receipt": receipt
    })))
}

/// Doctor-wise queues with estimated consultation times
pub async fn get_queues(State(state): State<Arc<OpdState>>) -> Result<Json<Value>, AppError> {
    let board = state.registry.lock().await.list_doctor_queues()?;

    Ok(Json(json!(board)))
}

/// Daily OPD summary
pub async fn get_summary(State(state): State<Arc<OpdState>>) -> Result<Json<Value>, AppError> {
    let summary = state.registry.lock().await.daily_summary();

    Ok(Json(json!(summary)))
}

/// Daily OPD summary as plain text
pub async fn get_summary_report(State(state): State<Arc<OpdState>>) -> Result<String, AppError> {
    let summary = state.registry.lock().await.daily_summary();

    Ok(report::render_summary(&summary))
}

/// Doctor-wise queues as plain text
pub async fn get_queue_report(State(state): State<Arc<OpdState>>) -> Result<String, AppError> {
    let board = state.registry.lock().await.list_doctor_queues()?;

    Ok(report::render_queue_board(&board))
}

/// Patient details by token as plain text
pub async fn get_patient_report(
    State(state): State<Arc<OpdState>>,
    Path(token): Path<String>,
) -> Result<String, AppError> {
    let token = parse_token(&token)?;
    let patient = state.registry.lock().await.find_by_token(token)?;

    Ok(report::render_patient(&patient))
}

/// Name search results as plain text
pub async fn search_report(
    State(state): State<Arc<OpdState>>,
    Query(query): Query<NameSearchQuery>,
) -> Result<String, AppError> {
    let results = state.registry.lock().await.find_by_name(&query.name)?;

    Ok(report::render_search_results(&results))
}

/// Write the summary and the full patient list to the configured export file
pub async fn export_report(State(state): State<Arc<OpdState>>) -> Result<Json<Value>, AppError> {
    let (contents, records) = {
        let registry = state.registry.lock().await;
        let summary = registry.daily_summary();
        (
            report::render_export(&summary, registry.records()),
            summary.total_registered,
        )
    };

    let path = &state.config.export_path;
    tokio::fs::write(path, contents).await.map_err(|e| {
        error!("Failed to write export to {}: {}", path, e);
        AppError::Internal("Export failed".to_string())
    })?;

    info!("Exported {} patient records to {}", records, path);

    Ok(Json(json!({
        "success": true,
        "path": path,
        "records": records,
        "message": format!("Patient list and summary exported to {}", path)
    })))
}
