//! Request input handed to controllers.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, request::Parts, Method};

use crate::analytics::PageView;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Everything a controller may read from the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    method: Method,
    path: String,
    vars: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    client_ip: Option<String>,
    user_agent: Option<String>,
}

impl Input {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            vars: BTreeMap::new(),
            query: BTreeMap::new(),
            client_ip: None,
            user_agent: None,
        }
    }

    /// Build from request parts plus the variables bound by the router.
    pub fn from_parts(parts: &Parts, vars: BTreeMap<String, String>) -> Self {
        let query = parts
            .uri
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        let forwarded = parts
            .headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let client_ip = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        });

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            vars,
            query,
            client_ip,
            user_agent,
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Route variable bound by the matched pattern.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn client_ip(&self) -> Option<&str> {
        self.client_ip.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn page_view(&self) -> PageView {
        PageView {
            path: self.path.clone(),
            client_ip: self.client_ip.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}
