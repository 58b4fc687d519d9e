//! The web application: route, dispatch, map errors to responses.
//!
//! # Data Flow
//! ```text
//! Request<Body>
//!     → Router::parse_route (method, path)
//!     → Input (route vars, query, client ip, user agent)
//!     → Controllers::dispatch(HandlerId)
//!     → Response, or AppError → 404 / 405 / 500
//!     → metrics + optional debug bar record
//! ```

pub mod debug;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

pub use debug::{DebugBar, RequestRecord};

use crate::config::WebsiteConfig;
use crate::controller::Controllers;
use crate::error::AppError;
use crate::http::Input;
use crate::observability::metrics;
use crate::renderer::Renderer;
use crate::routing::{HandlerId, RouteError, RouteMethod, Router};

pub const ERROR_TEMPLATE: &str = "error.html";
pub const DEBUG_BAR_TEMPLATE: &str = "debug_bar.html";
pub const X_DEBUG_HANDLER: &str = "x-debug-handler";
pub const SERVER_TIMING: &str = "server-timing";

pub struct WebApplication {
    config: Arc<WebsiteConfig>,
    router: Arc<Router>,
    controllers: Arc<Controllers>,
    renderer: Arc<dyn Renderer>,
    debug_bar: Option<Arc<DebugBar>>,
}

impl WebApplication {
    pub fn new(
        config: Arc<WebsiteConfig>,
        router: Arc<Router>,
        controllers: Arc<Controllers>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            config,
            router,
            controllers,
            renderer,
            debug_bar: None,
        }
    }

    pub fn set_debug_bar(&mut self, bar: Arc<DebugBar>) -> &mut Self {
        self.debug_bar = Some(bar);
        self
    }

    pub fn debug_bar(&self) -> Option<&Arc<DebugBar>> {
        self.debug_bar.as_ref()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    pub fn config(&self) -> &WebsiteConfig {
        &self.config
    }

    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let (parts, _body) = request.into_parts();
        let path = parts.uri.path().to_string();

        let mut handler = None;
        let result = match self.router.route_request(&parts.method, &path) {
            Ok(matched) => {
                handler = Some(matched.handler);
                let input = Input::from_parts(&parts, matched.vars);
                self.controllers.dispatch(matched.handler, &input).await
            }
            Err(e) => Err(AppError::from(e)),
        };

        let mut response = match result {
            Ok(response) => response,
            Err(e) => self.error_response(&e),
        };

        let status = response.status().as_u16();
        let handler_name = handler.as_ref().map(HandlerId::as_str).unwrap_or("none");
        metrics::record_request(parts.method.as_str(), status, handler_name, start);

        tracing::debug!(
            method = %parts.method,
            path = %path,
            handler = handler_name,
            status,
            "Request handled"
        );

        if let Some(bar) = &self.debug_bar {
            let elapsed = start.elapsed();
            bar.record(RequestRecord {
                at: Utc::now(),
                method: parts.method.to_string(),
                path,
                handler: handler.map(|h| h.as_str().to_string()),
                status,
                duration: elapsed,
            });

            let headers = response.headers_mut();
            headers.insert(X_DEBUG_HANDLER, HeaderValue::from_static(handler_name));
            let timing = format!("app;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
            if let Ok(value) = HeaderValue::from_str(&timing) {
                headers.insert(SERVER_TIMING, value);
            }

            if parts.method != Method::HEAD {
                response = self.attach_panel(bar, response).await;
            }
        }

        response
    }

    /// Render the debug panel just before `</body>` of HTML responses.
    /// Other responses, and sites without the panel template, pass through.
    async fn attach_panel(&self, bar: &DebugBar, response: Response) -> Response {
        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"));
        if !is_html || !self.renderer.has_template(DEBUG_BAR_TEMPLATE) {
            return response;
        }

        let panel = match self
            .renderer
            .render(DEBUG_BAR_TEMPLATE, &json!({ "debug_records": bar.records() }))
        {
            Ok(panel) => panel,
            Err(e) => {
                tracing::warn!(error = %e, "Debug panel failed to render");
                return response;
            }
        };

        let (mut parts, body) = response.into_parts();
        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Response body unreadable, debug panel skipped");
                return Response::from_parts(parts, Body::empty());
            }
        };

        let mut html = String::from_utf8_lossy(&bytes).into_owned();
        match html.rfind("</body>") {
            Some(at) => html.insert_str(at, &panel),
            None => html.push_str(&panel),
        }

        parts.headers.remove(header::CONTENT_LENGTH);
        Response::from_parts(parts, Body::from(html))
    }

    fn error_response(&self, error: &AppError) -> Response {
        let status = error.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR || status == StatusCode::BAD_GATEWAY {
            tracing::error!(error = %error, "Request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        }

        let message = if status.is_server_error() && !self.config.debug {
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            error.to_string()
        };

        let mut response = if self.renderer.has_template(ERROR_TEMPLATE) {
            let data = json!({ "code": status.as_u16(), "message": message });
            match self.renderer.render(ERROR_TEMPLATE, &data) {
                Ok(body) => (status, Html(body)).into_response(),
                Err(e) => {
                    tracing::warn!(error = %e, "Error page failed to render");
                    (status, message).into_response()
                }
            }
        } else {
            (status, message).into_response()
        };

        if let AppError::Route(RouteError::MethodNotAllowed { allowed, .. }) = error {
            let allow = allowed
                .iter()
                .map(RouteMethod::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }

        response
    }
}
