//! Pageview tracking for the JSON API.
//!
//! Sends Measurement Protocol hits in a background task. Failures are
//! logged and never reach the request that triggered them.

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::AnalyticsConfig;

/// A single tracked request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub path: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Analytics {
    http: reqwest::Client,
    config: Arc<AnalyticsConfig>,
}

impl Analytics {
    pub fn new(http: reqwest::Client, config: AnalyticsConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Form fields for one pageview hit.
    fn payload(&self, view: &PageView) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("v", "1".to_string()),
            ("tid", self.config.tracking_id.clone()),
            ("cid", Uuid::new_v4().to_string()),
            ("t", "pageview".to_string()),
            ("dp", view.path.clone()),
        ];
        if let Some(ip) = &view.client_ip {
            fields.push(("uip", ip.clone()));
        }
        if let Some(ua) = &view.user_agent {
            fields.push(("ua", ua.clone()));
        }
        fields
    }

    /// Send a pageview without waiting for it. Returns `None` when disabled.
    pub fn track(&self, view: PageView) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            return None;
        }

        let request = self
            .http
            .post(&self.config.endpoint)
            .form(&self.payload(&view));

        Some(tokio::spawn(async move {
            match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => tracing::trace!(path = %view.path, "Pageview sent"),
                Err(e) => tracing::warn!(path = %view.path, error = %e, "Failed to send pageview"),
            }
        }))
    }
}
