use std::sync::Arc;
use std::time::Instant;
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::StoreStatus;

// AppState is the process-scoped handle shared by every request
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog: Arc<dyn CatalogService>,
    pub(crate) store_status: StoreStatus,
    pub(crate) started_at: Instant,
}

impl AppState {
    // started_at is the process start, so uptime covers store initialization too
    pub fn new(config: Configuration, catalog: Arc<dyn CatalogService>, store_status: StoreStatus, started_at: Instant) -> AppState {
        AppState {
            config,
            catalog,
            store_status,
            started_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ServerError is an HTTP status with a json body that always carries a message
#[derive(Debug)]
pub(crate) struct ServerError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: ErrorBody { message: message.to_string(), error: None },
        }
    }

    // with_context moves the current message to `error` under a summary message
    pub fn with_context(self, message: &str) -> Self {
        Self {
            status: self.status,
            body: ErrorBody { message: message.to_string(), error: Some(self.body.message) },
        }
    }

    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, body: self.body }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Database { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
            CommandError::NotFound { .. } => { StatusCode::NOT_FOUND }
            CommandError::Runtime { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
            CommandError::Serialization { .. } => { StatusCode::BAD_REQUEST }
            CommandError::Validation { .. } => { StatusCode::BAD_REQUEST }
        };
        ServerError::new(status, err.message())
    }
}
