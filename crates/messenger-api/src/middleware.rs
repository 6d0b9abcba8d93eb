use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::session::Session;

/// Guard for admin routes. Logged-in requests get their `SessionClaims` in the
/// request extensions; everything else is sent to the login page.
pub async fn require_login(session: Session, mut req: Request, next: Next) -> Response {
    match session.claims() {
        Some(claims) if claims.logged_in => {
            req.extensions_mut().insert(claims.clone());
            next.run(req).await
        }
        _ => {
            debug!("Unauthenticated request to {}, redirecting to login", req.uri().path());
            Redirect::to("/login").into_response()
        }
    }
}
