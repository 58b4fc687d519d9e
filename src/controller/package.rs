use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};

use crate::error::{AppError, AppResult};
use crate::http::Input;
use crate::view::PackageHtmlView;

pub struct PackageController {
    view: Arc<PackageHtmlView>,
}

impl PackageController {
    pub fn new(view: Arc<PackageHtmlView>) -> Self {
        Self { view }
    }

    pub async fn execute(&self, input: &Input) -> AppResult<Response> {
        let package = input
            .var("package")
            .ok_or_else(|| AppError::NotFound(input.path().to_string()))?;
        Ok(Html(self.view.render(package).await?).into_response())
    }
}
