use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tera::{Context, Tera};

use crate::error::ApiError;

/// Served for unknown routes and for message ids that are not integers.
const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<title>404 Not Found</title>
<h1>Not Found</h1>
<p>The requested URL was not found on the server.</p>
</html>
";

/// Page templates, compiled once at startup from files embedded in the binary.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("about.html", include_str!("../templates/about.html")),
            ("admin.html", include_str!("../templates/admin.html")),
            ("login.html", include_str!("../templates/login.html")),
        ])?;
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>, ApiError> {
        Ok(Html(self.tera.render(name, context)?))
    }
}

pub fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// Router fallback.
pub async fn not_found() -> Response {
    not_found_page()
}
