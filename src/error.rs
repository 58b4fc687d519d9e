//! Application-wide error type.

use axum::http::StatusCode;

use crate::config::ConfigError;
use crate::helper::{ManifestError, PackagistError};
use crate::renderer::RenderError;
use crate::routing::{CompiledRouterError, RouteError};
use crate::services::ContainerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    CompiledRouter(#[from] CompiledRouterError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Packagist(#[from] PackagistError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status a request failing with this error should get.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::Route(RouteError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Route(RouteError::MethodNotAllowed { .. })
            | AppError::Route(RouteError::UnsupportedMethod(_)) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Packagist(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteMethod;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RouteError::NotFound("/x".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RouteError::MethodNotAllowed {
                path: "/".into(),
                allowed: vec![RouteMethod::Get],
            })
            .status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::from(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
