//! JSON API controllers.

use std::sync::Arc;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::analytics::Analytics;
use crate::error::{AppError, AppResult};
use crate::http::Input;
use crate::view::{PackageJsonView, StatusJsonView};

fn api_response(body: serde_json::Value) -> Response {
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

/// `GET /api/v1/packages`
pub struct StatusControllerGet {
    view: Arc<StatusJsonView>,
    analytics: Arc<Analytics>,
}

impl StatusControllerGet {
    pub fn new(view: Arc<StatusJsonView>, analytics: Arc<Analytics>) -> Self {
        Self { view, analytics }
    }

    pub async fn execute(&self, input: &Input) -> AppResult<Response> {
        let body = self.view.render().await?;
        self.analytics.track(input.page_view());
        Ok(api_response(body))
    }
}

/// `GET /api/v1/packages/:package`
pub struct PackageControllerGet {
    view: Arc<PackageJsonView>,
    analytics: Arc<Analytics>,
}

impl PackageControllerGet {
    pub fn new(view: Arc<PackageJsonView>, analytics: Arc<Analytics>) -> Self {
        Self { view, analytics }
    }

    pub async fn execute(&self, input: &Input) -> AppResult<Response> {
        let package = input
            .var("package")
            .ok_or_else(|| AppError::NotFound(input.path().to_string()))?;
        // Only pageviews that produced a response are counted.
        let body = self.view.render(package).await?;
        self.analytics.track(input.page_view());
        Ok(api_response(body))
    }
}
