use std::collections::HashMap;

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tera::Context;
use tracing::{debug, info};

use messenger_types::api::SessionClaims;
use messenger_types::models::Message;

use crate::error::ApiError;
use crate::session::Session;
use crate::{AppState, run_db, to_message};

/// Admin form checkboxes are named `delete<id>`.
const DELETE_FIELD_PREFIX: &str = "delete";

#[derive(Debug, Deserialize)]
pub struct NewMessageForm {
    pub message: String,
    pub username: String,
}

/// GET /: every message, newest first.
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Html<String>, ApiError> {
    let messages = load_messages(&state).await?;

    let mut context = Context::new();
    context.insert("logged_in", &session.logged_in());
    context.insert("messages", &messages);
    state.templates.render("index.html", &context)
}

/// POST /: store the message, then redirect back to the list.
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Form<NewMessageForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = payload.map_err(|e| {
        debug!("Rejected message form: {}", e);
        ApiError::BadRequest
    })?;
    let id = run_db(&state, move |db| db.create_message(&form.message, &form.username)).await?;
    info!("Message {} posted from home page", id);
    Ok(Redirect::to("/"))
}

pub async fn about(State(state): State<AppState>, session: Session) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("logged_in", &session.logged_in());
    state.templates.render("about.html", &context)
}

/// GET /admin: oldest first, one delete checkbox per message.
pub async fn admin(
    State(state): State<AppState>,
    Extension(_claims): Extension<SessionClaims>,
) -> Result<Html<String>, ApiError> {
    let mut messages = load_messages(&state).await?;
    messages.reverse();

    let mut context = Context::new();
    context.insert("logged_in", &true);
    context.insert("messages", &messages);
    state.templates.render("admin.html", &context)
}

/// POST /admin: bulk delete of every checked `delete<id>` field.
pub async fn admin_delete(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    let ids = selected_ids(&fields);
    info!("Admin {} deleting messages {:?}", claims.sub, ids);
    run_db(&state, move |db| db.delete_messages(&ids)).await?;
    Ok(Redirect::to("/admin"))
}

async fn load_messages(state: &AppState) -> Result<Vec<Message>, ApiError> {
    let rows = run_db(state, |db| db.list_messages(None)).await?;
    Ok(rows.into_iter().map(to_message).collect())
}

fn selected_ids(fields: &HashMap<String, String>) -> Vec<i64> {
    let mut ids: Vec<i64> = fields
        .keys()
        .filter_map(|key| {
            let digits = key.strip_prefix(DELETE_FIELD_PREFIX)?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()
        })
        .collect();
    ids.sort_unstable();
    ids
}
