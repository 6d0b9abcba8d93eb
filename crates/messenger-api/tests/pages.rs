use axum::http::StatusCode;

mod common;
use common::TestApp;

#[tokio::test]
async fn about_page_renders() {
    let app = TestApp::spawn();

    let resp = app.get("/about", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("About page, nothing to see here."));
}

#[tokio::test]
async fn home_page_post_redirects_and_shows_message() {
    let app = TestApp::spawn();

    let before = app.get("/", None).await;
    assert!(!before.body.contains("test user"));
    assert!(!before.body.contains("test message"));

    let posted = app
        .post_form("/", "username=test+user&message=test+message", None)
        .await;
    assert_eq!(posted.status, StatusCode::SEE_OTHER);
    assert_eq!(posted.location(), Some("/"));

    let after = app.follow(&posted, None).await;
    assert_eq!(after.status, StatusCode::OK);
    assert!(after.body.contains("test user"));
    assert!(after.body.contains("test message"));
}

#[tokio::test]
async fn home_page_lists_newest_first() {
    let app = TestApp::with_five_messages();

    let body = app.get("/", None).await.body;

    let newest = body.find("message #4").unwrap();
    let oldest = body.find("message #0").unwrap();
    assert!(newest < oldest);
}

#[tokio::test]
async fn home_page_post_with_missing_field_inserts_nothing() {
    let app = TestApp::spawn();

    let resp = app.post_form("/", "message=orphan", None).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"], "Bad request");
    assert!(app.db.list_messages(None).unwrap().is_empty());
}

#[tokio::test]
async fn login_with_missing_field_is_bad_request() {
    let app = TestApp::spawn();

    let resp = app.post_form("/login", "username=admin", None).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"], "Bad request");
    assert!(resp.session_cookie().is_none());
}

#[tokio::test]
async fn admin_delete_ignores_signed_ids() {
    let app = TestApp::with_five_messages();
    let cookie = app.admin_cookie();

    let resp = app.post_form("/admin", "delete%2B1=on", Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(app.db.list_messages(None).unwrap().len(), 5);
}

#[tokio::test]
async fn admin_redirects_to_login_when_anonymous() {
    let app = TestApp::spawn();

    let resp = app.get("/admin", None).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login"));

    let login = app.follow(&resp, None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body.contains("Please login:"));
}

#[tokio::test]
async fn admin_rejects_forged_session() {
    let app = TestApp::spawn();

    let resp = app.get("/admin", Some("session=forged.token.value")).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login"));
}

#[tokio::test]
async fn admin_accessible_with_session() {
    let app = TestApp::spawn();
    let cookie = app.admin_cookie();

    let resp = app.get("/admin", Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No messages found."));
    assert!(resp.body.contains("Logout"));
}

#[tokio::test]
async fn admin_lists_oldest_first() {
    let app = TestApp::with_five_messages();
    let cookie = app.admin_cookie();

    let body = app.get("/admin", Some(&cookie)).await.body;

    let oldest = body.find("message #0").unwrap();
    let newest = body.find("message #4").unwrap();
    assert!(oldest < newest);
    assert!(body.contains(r#"name="delete1""#));
}

#[tokio::test]
async fn admin_bulk_delete() {
    let app = TestApp::with_five_messages();
    let cookie = app.admin_cookie();

    let before = app.get("/admin", Some(&cookie)).await;
    assert!(before.body.contains("message #0"));
    assert!(before.body.contains("message #1"));

    let resp = app
        .post_form("/admin", "delete1=on&delete2=on", Some(&cookie))
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let after = app.follow(&resp, Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::OK);
    assert!(!after.body.contains("message #0"));
    assert!(!after.body.contains("message #1"));
    assert!(after.body.contains("message #2"));
    assert_eq!(app.db.list_messages(None).unwrap().len(), 3);
}

#[tokio::test]
async fn admin_delete_requires_session() {
    let app = TestApp::with_five_messages();

    let resp = app.post_form("/admin", "delete1=on", None).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login"));
    assert_eq!(app.db.list_messages(None).unwrap().len(), 5);
}

#[tokio::test]
async fn login_then_logout() {
    let app = TestApp::spawn();

    let resp = app.post_form("/login", "username=admin&password=123", None).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/admin"));
    let cookie = resp.session_cookie().expect("login sets the session cookie");

    let admin = app.follow(&resp, Some(&cookie)).await;
    assert_eq!(admin.status, StatusCode::OK);
    assert!(admin.body.contains("Logout"));

    let logout = app.get("/logout", Some(&cookie)).await;
    assert_eq!(logout.status, StatusCode::SEE_OTHER);
    let cleared = logout.headers.get(axum::http::header::SET_COOKIE).unwrap();
    assert!(cleared.to_str().unwrap().starts_with("session=;"));

    let home = app.follow(&logout, None).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Login"));
    assert!(!home.body.contains("Logout"));
}

#[tokio::test]
async fn login_with_wrong_credentials_rerenders_form() {
    let app = TestApp::spawn();

    for form in ["username=adminx&password=123", "username=admin&password=123x"] {
        let resp = app.post_form("/login", form, None).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Invalid username and/or password"));
        assert!(resp.session_cookie().is_none());
    }
}
