use std::collections::HashMap;
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Form, FromRequest, Path, State},
    http::{header, Request, StatusCode},
    response::Json,
};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::core::command::{Command, CommandError};
use crate::core::controller::{AppState, json_to_server_error, ServerError};

// BookPayload is the create body, read as json or as an url-encoded form
// depending on the content type.
#[derive(Debug)]
pub(crate) struct BookPayload(pub(crate) Value);

#[async_trait]
impl<S> FromRequest<S, Body> for BookPayload where S: Send + Sync {
    type Rejection = ServerError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|val| val.to_str().ok())
            .map(|val| val.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        if is_form {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await
                .map_err(|rejection| ServerError::new(rejection.status(), rejection.body_text().as_str()))?;
            let obj: Map<String, Value> = fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
            Ok(BookPayload(Value::Object(obj)))
        } else {
            let Json(val) = Json::<Value>::from_request(req, state).await
                .map_err(|rejection| ServerError::new(rejection.status(), rejection.body_text().as_str()))?;
            Ok(BookPayload(val))
        }
    }
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::default()).await
        .map_err(|err| {
            error!("Error fetching books: {}", err);
            ServerError::from(err).with_status(StatusCode::INTERNAL_SERVER_ERROR)
        })?;
    Ok(Json(res))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    payload: Result<BookPayload, ServerError>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let add_error = |err: ServerError| {
        warn!("Error adding book: {}", err.body.message);
        err.with_context("Error adding book").with_status(StatusCode::BAD_REQUEST)
    };
    let BookPayload(body) = payload.map_err(add_error)?;
    debug!("Received book data: {}", body);
    // serde would otherwise fill the fields of a sequence by position
    if !body.is_object() {
        return Err(add_error(ServerError::new(StatusCode::BAD_REQUEST, "request body must be an object")));
    }
    let req: AddBookCommandRequest = serde_json::from_value(body).map_err(|err| add_error(json_to_server_error(err)))?;
    let res = AddBookCommand::new(state.catalog).execute(req).await
        .map_err(|err| add_error(ServerError::from(err)))?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    debug!("Deleting book with ISBN: {}", isbn);
    let req = RemoveBookCommandRequest::new(isbn);
    let res = RemoveBookCommand::new(state.catalog).execute(req).await
        .map_err(|err| match err {
            CommandError::NotFound { .. } => ServerError::from(err),
            other => {
                error!("Error deleting book: {}", other);
                ServerError::from(other)
                    .with_context("Error deleting book")
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        })?;
    Ok(Json(res))
}
