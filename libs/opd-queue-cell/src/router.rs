use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    export_report, get_patient, get_patient_report, get_queue_report, get_queues, get_summary,
    get_summary_report, list_doctors, mark_consulted, register_patient, search_patients,
    search_report, OpdState,
};

pub fn create_opd_queue_router(state: Arc<OpdState>) -> Router {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/patients", post(register_patient).get(search_patients))
        .route("/patients/{token}", get(get_patient))
        .route("/patients/{token}/consult", post(mark_consulted))
        .route("/queues", get(get_queues))
        .route("/summary", get(get_summary))
        .route("/reports/summary", get(get_summary_report))
        .route("/reports/queues", get(get_queue_report))
        .route("/reports/patients", get(search_report))
        .route("/reports/patients/{token}", get(get_patient_report))
        .route("/export", post(export_report))
        .with_state(state)
}
