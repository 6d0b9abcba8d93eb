use axum::{
    Json,
    extract::{FromRequestParts, Path, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use messenger_types::api::{CreateMessageRequest, DeleteResponse, MessagesResponse};

use crate::error::ApiError;
use crate::templates::not_found_page;
use crate::{AppState, run_db, to_message};

/// `{id}` path segment. Anything but plain digits does not match the route
/// and gets the generic 404 page, not a JSON error.
#[derive(Debug, Clone, Copy)]
pub struct MessageId(pub i64);

impl<S> FromRequestParts<S> for MessageId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found_page())?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_found_page());
        }
        raw.parse().map(MessageId).map_err(|_| not_found_page())
    }
}

/// GET /messages/api
pub async fn list_messages(State(state): State<AppState>) -> Result<Json<MessagesResponse>, ApiError> {
    lookup(&state, None).await
}

/// GET /messages/api/{id}
pub async fn get_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
) -> Result<Json<MessagesResponse>, ApiError> {
    lookup(&state, Some(id)).await
}

/// POST /messages/api: 201 with the stored record, shaped like a lookup.
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| {
        debug!("Rejected message body: {}", e);
        ApiError::BadRequest
    })?;

    let id = run_db(&state, move |db| db.create_message(&req.message, &req.sender)).await?;
    info!("Message {} created via API", id);

    let body = lookup(&state, Some(id)).await?;
    Ok((StatusCode::CREATED, body))
}

/// DELETE /messages/api/{id}: always `{"result": true}`, whether or not the
/// row existed.
pub async fn delete_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
) -> Result<Json<DeleteResponse>, ApiError> {
    run_db(&state, move |db| db.delete_message(id)).await?;
    info!("Message {} deleted via API", id);
    Ok(Json(DeleteResponse { result: true }))
}

async fn lookup(state: &AppState, id: Option<i64>) -> Result<Json<MessagesResponse>, ApiError> {
    let rows = run_db(state, move |db| db.list_messages(id)).await?;
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessagesResponse {
        messages: rows.into_iter().map(to_message).collect(),
    }))
}
