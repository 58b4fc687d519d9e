use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::http::Input;
use crate::renderer::Renderer;

/// Renders a static page from `pages/{view}.html`.
pub struct PageController {
    renderer: Arc<dyn Renderer>,
}

/// View names are restricted to `[A-Za-z0-9_-]+` so they can never escape
/// the pages directory.
fn is_valid_view(view: &str) -> bool {
    !view.is_empty()
        && view
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl PageController {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    pub async fn execute(&self, input: &Input) -> AppResult<Response> {
        let view = input.var("view").unwrap_or_default();
        if !is_valid_view(view) {
            return Err(AppError::NotFound(format!("page '{view}'")));
        }

        let template = format!("pages/{view}.html");
        if !self.renderer.has_template(&template) {
            return Err(AppError::NotFound(format!("page '{view}'")));
        }

        let body = self.renderer.render(&template, &json!({ "view": view }))?;
        Ok(Html(body).into_response())
    }
}
