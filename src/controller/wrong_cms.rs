use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::AppResult;
use crate::http::Input;

pub const WRONG_CMS_MESSAGE: &str = "This isn't the CMS you're looking for.";

/// Answers probes for other CMS admin paths.
#[derive(Debug, Default)]
pub struct WrongCmsController;

impl WrongCmsController {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, input: &Input) -> AppResult<Response> {
        tracing::debug!(path = %input.path(), "Wrong CMS probe");
        Ok((
            StatusCode::NOT_FOUND,
            [
                (header::CACHE_CONTROL, "public, max-age=86400"),
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            ],
            WRONG_CMS_MESSAGE,
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[tokio::test]
    async fn test_fixed_response() {
        let input = Input::new(Method::GET, "/wp-admin/install.php");
        let response = WrongCmsController::new().execute(&input).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let cache = response.headers()[header::CACHE_CONTROL].to_str().unwrap();
        assert!(cache.starts_with("public"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], WRONG_CMS_MESSAGE.as_bytes());
    }
}
