pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod rest;
pub mod session;
pub mod templates;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use messenger_db::Database;
use messenger_db::models::MessageRow;
use messenger_types::models::Message;

use crate::config::Config;
use crate::error::ApiError;
use crate::templates::Templates;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub config: Config,
    pub templates: Templates,
}

impl AppStateInner {
    pub fn new(db: Database, config: Config) -> Result<Self, tera::Error> {
        Ok(Self {
            db,
            config,
            templates: Templates::new()?,
        })
    }
}

/// All HTML and REST routes. Tracing and other outer layers are added by the
/// binary.
pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(pages::admin).post(pages::admin_delete))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_login));

    let api_routes = Router::new()
        .route("/messages/api", get(rest::list_messages).post(rest::create_message))
        .route("/messages/api/{id}", get(rest::get_message).delete(rest::delete_message))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(pages::home).post(pages::post_message))
        .route("/about", get(pages::about))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(health))
        .merge(admin_routes)
        .merge(api_routes)
        .fallback(templates::not_found)
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}

/// Run a blocking store call off the async runtime.
pub(crate) async fn run_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    let result = tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::from(e)
        })?;
    Ok(result?)
}

pub(crate) fn to_message(row: MessageRow) -> Message {
    Message {
        id: row.id,
        dt: row.dt,
        message: row.message,
        sender: row.sender,
    }
}
