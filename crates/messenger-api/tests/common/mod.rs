#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use messenger_api::config::Config;
use messenger_api::session;
use messenger_api::{AppStateInner, router};
use messenger_db::Database;

pub struct TestApp {
    pub db: Database,
    pub config: Config,
    router: Router,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// `name=value` part of the session Set-Cookie header, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(session::SESSION_COOKIE))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    pub fn spawn() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::development();
        config.database_path = dir.path().join("messenger-test.db");

        let db = Database::open(&config.database_path).unwrap();
        let state = Arc::new(AppStateInner::new(db.clone(), config.clone()).unwrap());

        Self {
            db,
            config,
            router: router(state),
            _dir: dir,
        }
    }

    /// Five messages, `message #0` .. `message #4`, ids 1..=5.
    pub fn with_five_messages() -> Self {
        let app = Self::spawn();
        for i in 0..5 {
            app.db
                .create_message(&format!("message #{i}"), &format!("sender #{i}"))
                .unwrap();
        }
        app
    }

    /// Cookie header value for a logged-in admin, as if the login form had
    /// been submitted.
    pub fn admin_cookie(&self) -> String {
        let token = session::issue_token(&self.config.secret_key, &self.config.admin_username).unwrap();
        format!("{}={}", session::SESSION_COOKIE, token)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, cookie).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri, None).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> TestResponse {
        self.send(
            request(Method::POST, uri, cookie)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            request(Method::POST, uri, None)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            request(Method::POST, uri, None)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// GET the redirect target of `response`, carrying `cookie` along.
    pub async fn follow(&self, response: &TestResponse, cookie: Option<&str>) -> TestResponse {
        assert!(
            response.status.is_redirection(),
            "expected a redirect, got {}",
            response.status
        );
        let location = response.location().expect("redirect has a Location").to_string();
        self.get(&location, cookie).await
    }
}

fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}
