//! axum integration (feature `axum`).
//!
//! Handlers can return rendered views directly:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::{extract::State, response::Html};
//! use viewkit::{RenderError, TemplateRegistry};
//!
//! async fn index(State(views): State<Arc<TemplateRegistry>>) -> Result<Html<String>, RenderError> {
//!     views.html("index.html", &serde_json::json!({ "title": "Home" }), &())
//! }
//! ```
//!
//! Any [`RenderError`] becomes an empty `500 Internal Server Error`, including
//! an unknown template name: the name is a programming error on the server,
//! never something the client asked for.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::registry::TemplateRegistry;

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl TemplateRegistry {
    /// Renders `name` into an HTML response body.
    ///
    /// # Errors
    ///
    /// See [`render`](TemplateRegistry::render).
    pub fn html<S, C>(&self, name: &str, data: &S, ctx: &C) -> Result<Html<String>, RenderError>
    where
        S: Serialize + ?Sized,
        C: RenderContext + ?Sized,
    {
        self.render_to_string(name, data, ctx).map(Html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewkit_vfs::MemoryFs;

    fn registry() -> TemplateRegistry {
        let fs = MemoryFs::new().with_file("fragments/data.html", "<p>{{ msg }}</p>");
        let mut registry = TemplateRegistry::new();
        registry.add(&fs, &["fragments/*.html"]).unwrap();
        registry
    }

    #[test]
    fn test_html_ok() {
        let data = serde_json::json!({ "msg": "hi" });
        let Html(body) = registry().html("data.html", &data, &()).unwrap();
        assert_eq!(body, "<p>hi</p>");

        let response = registry().html("data.html", &data, &()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_not_found_is_internal_server_error() {
        let response = registry()
            .html("missing.html", &(), &())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_execution_error_is_internal_server_error() {
        // Strict undefined: `msg` is missing from the data.
        let response = registry().html("data.html", &(), &()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
