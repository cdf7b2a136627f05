use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use opd_queue_cell::{create_opd_queue_router, handlers::OpdState};

pub fn create_router(state: Arc<OpdState>) -> Router {
    Router::new()
        .route("/", get(|| async { "OPD queue API is running!" }))
        .nest("/opd", create_opd_queue_router(state))
}
