//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use framework_website::config::WebsiteConfig;
use framework_website::model::Database;
use framework_website::{bootstrap, Container, HttpServer, WebApplication};

pub const MANIFEST: &str = r#"
[packages.di]
display = "DI"

[packages.http]
display = "HTTP"
repo = "http-client"
deprecated = true
"#;

/// A throwaway site: templates, manifest, database and router cache in a temp dir.
pub struct TestSite {
    pub dir: TempDir,
    pub config: WebsiteConfig,
}

fn write(root: &Path, name: &str, content: &str) {
    let file = root.join(name);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

impl TestSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(
            root,
            "templates/index.html",
            "<html><body><h1>Homepage</h1></body></html>",
        );
        write(
            root,
            "templates/status.html",
            "{% for p in packages %}[{{ p.display }}:{% if p.version %}{{ p.version }}{% endif %}:{{ p.downloads | default(value=\"none\") }}]{% endfor %} total={{ total_downloads }}",
        );
        write(
            root,
            "templates/package.html",
            "{{ package.display }} {{ repository_url | safe }}{% for r in releases %} {{ r.version }}{% endfor %}",
        );
        write(root, "templates/error.html", "Error {{ code }}: {{ message }}");
        write(root, "templates/pages/about.html", "About page");
        write(
            root,
            "templates/debug_bar.html",
            "<div id=\"debug-bar\">{% for r in debug_records %}[{{ r.method }} {{ r.path }} {{ r.status }}]{% endfor %}</div>",
        );
        write(root, "www/media/css/site.css", "body {}");
        write(root, "packages.toml", MANIFEST);

        let mut config = WebsiteConfig::default();
        config.templates.path = root.join("templates").display().to_string();
        config.server.media_dir = root.join("www/media").display().to_string();
        config.packages.manifest = root.join("packages.toml").display().to_string();
        config.router.compiled_path = root.join("cache/router.json").display().to_string();
        config.database.url = format!("sqlite://{}", root.join("website.db").display());
        // Nothing listens here: Packagist lookups fail fast unless a test
        // points base_url at a mock server.
        config.packagist.base_url = "http://127.0.0.1:9".to_string();

        Self { dir, config }
    }

    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    pub fn packagist(mut self, server: &MockServer) -> Self {
        self.config.packagist.base_url = server.uri();
        self
    }

    /// Container with the schema migrated.
    pub async fn container(&self) -> Container {
        let container = bootstrap(self.config.clone());
        container.get::<Database>().unwrap().migrate().await.unwrap();
        container
    }

    pub async fn router(&self) -> (Container, axum::Router) {
        let container = self.container().await;
        let app = container.get::<WebApplication>().unwrap();
        let router = HttpServer::build_router(app, &self.config);
        (container, router)
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(router: &axum::Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: &axum::Router, uri: &str) -> TestResponse {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub fn packagist_body(name: &str, total: u64) -> serde_json::Value {
    json!({
        "package": {
            "name": format!("joomla/{name}"),
            "downloads": { "total": total },
            "versions": {
                "dev-master": { "version": "dev-master", "time": "2024-05-01T10:00:00+00:00" },
                "2.0.0": { "version": "2.0.0", "time": "2022-01-10T08:00:00+00:00" },
                "1.0.0": { "version": "1.0.0", "time": "2014-02-03T12:30:00+00:00" }
            }
        }
    })
}

/// Mock Packagist answering for every manifest package.
pub async fn packagist_server() -> MockServer {
    let server = MockServer::start().await;
    for (name, total) in [("di", 1500), ("http", 500)] {
        Mock::given(method("GET"))
            .and(path(format!("/packages/joomla/{name}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(packagist_body(name, total)))
            .mount(&server)
            .await;
    }
    server
}
