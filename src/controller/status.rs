use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};

use crate::error::AppResult;
use crate::http::Input;
use crate::view::StatusHtmlView;

pub struct StatusController {
    view: Arc<StatusHtmlView>,
}

impl StatusController {
    pub fn new(view: Arc<StatusHtmlView>) -> Self {
        Self { view }
    }

    pub async fn execute(&self, _input: &Input) -> AppResult<Response> {
        Ok(Html(self.view.render().await?).into_response())
    }
}
