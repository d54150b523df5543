use axum::{
    extract::State,
    response::Json,
};
use serde::Serialize;
use crate::core::controller::AppState;
use crate::utils::date::iso_timestamp;

#[derive(Debug, Serialize)]
pub(crate) struct StatusResponse {
    pub message: String,
    pub timestamp: String,
    pub store_connected: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub status: String,
    pub uptime: f64,
    pub store_connected: bool,
    pub timestamp: String,
}

// Both handlers only read the connectivity flag the store client maintains; they
// never touch the store and never fail.
pub(crate) async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Server is running!".to_string(),
        timestamp: iso_timestamp(),
        store_connected: state.store_status.is_connected(),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct RouterCheckResponse {
    pub message: String,
}

// router_check answers from the api router alone, with no state involved
pub(crate) async fn router_check() -> Json<RouterCheckResponse> {
    Json(RouterCheckResponse {
        message: "Router is working correctly!".to_string(),
    })
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        store_connected: state.store_status.is_connected(),
        timestamp: iso_timestamp(),
    })
}
