use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tera::Context;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::AppState;
use crate::config::Config;
use crate::error::ApiError;
use crate::session::{self, Session};

#[derive(Debug, Error)]
#[error("invalid username and/or password")]
pub struct AuthFailure;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Compare submitted credentials against the configured admin pair.
pub fn verify_credentials(config: &Config, username: &str, password: &str) -> Result<(), AuthFailure> {
    if username == config.admin_username && password == config.admin_password {
        Ok(())
    } else {
        Err(AuthFailure)
    }
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    render_login(&state, session.logged_in(), false)
}

/// POST /login: on success set the session cookie and go to the admin page,
/// otherwise re-render the form with an error.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = payload.map_err(|e| {
        debug!("Rejected login form: {}", e);
        ApiError::BadRequest
    })?;
    match verify_credentials(&state.config, &form.username, &form.password) {
        Ok(()) => {
            let token = session::issue_token(&state.config.secret_key, &form.username)?;
            info!("Admin {} logged in", form.username);
            Ok((jar.add(session::session_cookie(token)), Redirect::to("/admin")).into_response())
        }
        Err(e) => {
            warn!("Login rejected for {:?}: {}", form.username, e);
            Ok(render_login(&state, false, true)?.into_response())
        }
    }
}

/// GET /logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    info!("Admin logged out");
    (jar.remove(session::removal_cookie()), Redirect::to("/"))
}

fn render_login(state: &AppState, logged_in: bool, invalid: bool) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("logged_in", &logged_in);
    context.insert("invalid", &invalid);
    state.templates.render("login.html", &context)
}
