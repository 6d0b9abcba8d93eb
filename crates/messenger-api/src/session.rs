use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use messenger_types::api::SessionClaims;

use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Sign a logged-in claim for `username`. Tokens carry no expiry: a session
/// lasts until logout or until the secret key changes.
pub fn issue_token(secret: &str, username: &str) -> jsonwebtoken::errors::Result<String> {
    let claims = SessionClaims {
        sub: username.to_string(),
        logged_in: true,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode a session token. Anything that fails signature or shape checks
/// reads as no session at all.
pub fn decode_token(secret: &str, token: &str) -> Option<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .ok()
        .map(|data| data.claims)
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Per-request view of the session cookie.
#[derive(Debug, Clone, Default)]
pub struct Session {
    claims: Option<SessionClaims>,
}

impl Session {
    pub fn logged_in(&self) -> bool {
        self.claims.as_ref().is_some_and(|c| c.logged_in)
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let claims = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| decode_token(&state.config.secret_key, cookie.value()));

        Ok(Self { claims })
    }
}
