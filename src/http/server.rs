//! HTTP server setup.
//!
//! Everything except `/media` falls through to `WebApplication::handle`,
//! which runs the website's own router.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, extract::State, http::Request, response::Response, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::WebsiteConfig;
use crate::web::WebApplication;

pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(app: Arc<WebApplication>, config: &WebsiteConfig) -> Self {
        Self {
            router: Self::build_router(app, config),
        }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(app: Arc<WebApplication>, config: &WebsiteConfig) -> Router {
        Router::new()
            .nest_service("/media", ServeDir::new(&config.server.media_dir))
            .fallback(dispatch)
            .with_state(app)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout_secs,
                    ))),
            )
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn dispatch(State(app): State<Arc<WebApplication>>, request: Request<Body>) -> Response {
    app.handle(request).await
}
