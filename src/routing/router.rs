//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route matching method and path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) linear scan (the table is small, no trie needed)
//! - First match wins: anyone adding a route must place specific patterns
//!   ahead of catch-alls such as `/:view`
//! - Explicit NotFound / MethodNotAllowed rather than silent default

use std::collections::BTreeMap;
use std::fmt;

use axum::http::Method;
use serde::{Deserialize, Serialize};

use crate::routing::pattern::{PatternError, RoutePattern};

/// HTTP methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl RouteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Head => "HEAD",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Patch => "PATCH",
            RouteMethod::Delete => "DELETE",
            RouteMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&Method> for RouteMethod {
    type Error = RouteError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        Ok(match *method {
            Method::GET => RouteMethod::Get,
            Method::HEAD => RouteMethod::Head,
            Method::POST => RouteMethod::Post,
            Method::PUT => RouteMethod::Put,
            Method::PATCH => RouteMethod::Patch,
            Method::DELETE => RouteMethod::Delete,
            Method::OPTIONS => RouteMethod::Options,
            _ => return Err(RouteError::UnsupportedMethod(method.to_string())),
        })
    }
}

/// Identifies the controller a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerId {
    Homepage,
    Page,
    Status,
    Package,
    WrongCms,
    ApiStatus,
    ApiPackage,
}

impl HandlerId {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerId::Homepage => "homepage",
            HandlerId::Page => "page",
            HandlerId::Status => "status",
            HandlerId::Package => "package",
            HandlerId::WrongCms => "wrong_cms",
            HandlerId::ApiStatus => "api_status",
            HandlerId::ApiPackage => "api_package",
        }
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: RouteMethod,
    pub pattern: RoutePattern,
    pub handler: HandlerId,
}

impl Route {
    pub fn new(method: RouteMethod, pattern: &str, handler: HandlerId) -> Result<Self, RouteError> {
        Ok(Self {
            method,
            pattern: RoutePattern::parse(pattern)?,
            handler,
        })
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub handler: HandlerId,
    /// Position of the matched route in the table.
    pub index: usize,
    pub vars: BTreeMap<String, String>,
}

/// Routing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("method not allowed for '{path}'")]
    MethodNotAllowed {
        path: String,
        allowed: Vec<RouteMethod>,
    },

    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Ordered route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from already-parsed routes, keeping their order.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Append a route to the end of the table.
    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.routes.push(route);
        self
    }

    fn register(
        &mut self,
        method: RouteMethod,
        pattern: &str,
        handler: HandlerId,
    ) -> Result<&mut Self, RouteError> {
        let route = Route::new(method, pattern, handler)?;
        Ok(self.add_route(route))
    }

    pub fn get(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Get, pattern, handler)
    }

    pub fn head(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Head, pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Post, pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Put, pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Patch, pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Delete, pattern, handler)
    }

    pub fn options(&mut self, pattern: &str, handler: HandlerId) -> Result<&mut Self, RouteError> {
        self.register(RouteMethod::Options, pattern, handler)
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route whose method and pattern both match.
    pub fn parse_route(&self, method: RouteMethod, path: &str) -> Result<RouteMatch, RouteError> {
        self.lookup(Some(method), path)
    }

    /// Like `parse_route`, for any HTTP method. A method no route can be
    /// registered for still yields `NotFound` when the path matches nothing.
    pub fn route_request(&self, method: &Method, path: &str) -> Result<RouteMatch, RouteError> {
        match RouteMethod::try_from(method) {
            Ok(method) => self.lookup(Some(method), path),
            Err(_) => self.lookup(None, path),
        }
    }

    fn lookup(&self, method: Option<RouteMethod>, path: &str) -> Result<RouteMatch, RouteError> {
        let mut allowed = Vec::new();

        for (index, route) in self.routes.iter().enumerate() {
            let Some(vars) = route.pattern.matches(path) else {
                continue;
            };

            if method == Some(route.method) {
                return Ok(RouteMatch {
                    handler: route.handler,
                    index,
                    vars,
                });
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method);
            }
        }

        if allowed.is_empty() {
            Err(RouteError::NotFound(path.to_string()))
        } else {
            Err(RouteError::MethodNotAllowed {
                path: path.to_string(),
                allowed,
            })
        }
    }
}
