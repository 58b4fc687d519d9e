use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::error::AppResult;
use crate::http::Input;
use crate::renderer::Renderer;

pub const HOMEPAGE_TEMPLATE: &str = "index.html";

pub struct HomepageController {
    renderer: Arc<dyn Renderer>,
}

impl HomepageController {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    pub async fn execute(&self, _input: &Input) -> AppResult<Response> {
        let body = self.renderer.render(HOMEPAGE_TEMPLATE, &json!({}))?;
        Ok(Html(body).into_response())
    }
}
