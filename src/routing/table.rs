//! The website's static route table.

use crate::routing::router::{HandlerId, RouteError, Router};

/// Build the default route table.
///
/// Order is significant: the CMS admin traps must stay ahead of the
/// generic `/:view` page route, which would otherwise swallow them.
pub fn website_routes() -> Result<Router, RouteError> {
    let mut router = Router::new();

    // CMS admin panels
    router
        .get("/administrator", HandlerId::WrongCms)?
        .get("/administrator/*", HandlerId::WrongCms)?
        .get("/wp-admin", HandlerId::WrongCms)?
        .get("/wp-admin/*", HandlerId::WrongCms)?
        .get("wp-login.php", HandlerId::WrongCms)?;

    // Web routes
    router
        .get("/", HandlerId::Homepage)?
        .head("/", HandlerId::Homepage)?
        .get("/status", HandlerId::Status)?
        .get("/:view", HandlerId::Page)?
        .get("/status/:package", HandlerId::Package)?;

    // API routes
    router
        .get("/api/v1/packages", HandlerId::ApiStatus)?
        .get("/api/v1/packages/:package", HandlerId::ApiPackage)?;

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::router::RouteMethod;

    fn resolve(path: &str) -> HandlerId {
        website_routes()
            .unwrap()
            .parse_route(RouteMethod::Get, path)
            .unwrap()
            .handler
    }

    /// Turn a pattern into a concrete path it matches.
    fn sample_path(pattern: &str) -> String {
        let segments: Vec<String> = pattern
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s.starts_with(':') {
                    "sample".to_string()
                } else if s.starts_with('*') {
                    "deep/sample".to_string()
                } else {
                    s.to_string()
                }
            })
            .collect();
        format!("/{}", segments.join("/"))
    }

    #[test]
    fn test_table_order() {
        let router = website_routes().unwrap();
        let handlers: Vec<_> = router.routes().iter().map(|r| r.handler).collect();
        assert_eq!(
            handlers,
            vec![
                HandlerId::WrongCms,
                HandlerId::WrongCms,
                HandlerId::WrongCms,
                HandlerId::WrongCms,
                HandlerId::WrongCms,
                HandlerId::Homepage,
                HandlerId::Homepage,
                HandlerId::Status,
                HandlerId::Page,
                HandlerId::Package,
                HandlerId::ApiStatus,
                HandlerId::ApiPackage,
            ]
        );
    }

    #[test]
    fn test_cms_traps_are_never_shadowed() {
        for path in [
            "/administrator",
            "/administrator/plugins",
            "/administrator/index.php/x",
            "/wp-admin",
            "/wp-admin/install.php",
            "/wp-login.php",
        ] {
            assert_eq!(resolve(path), HandlerId::WrongCms, "{path}");
        }
    }

    #[test]
    fn test_web_and_api_routes() {
        assert_eq!(resolve("/"), HandlerId::Homepage);
        assert_eq!(resolve("/status"), HandlerId::Status);
        assert_eq!(resolve("/about"), HandlerId::Page);
        assert_eq!(resolve("/status/router"), HandlerId::Package);
        assert_eq!(resolve("/api/v1/packages"), HandlerId::ApiStatus);
        assert_eq!(resolve("/api/v1/packages/router"), HandlerId::ApiPackage);
    }

    #[test]
    fn test_no_route_is_reached_past_an_earlier_match() {
        let router = website_routes().unwrap();
        for (index, route) in router.routes().iter().enumerate() {
            let path = sample_path(route.pattern.as_str());
            let matched = router.parse_route(route.method, &path).unwrap();
            assert!(matched.index <= index, "{path} resolved past route {index}");

            // whatever route wins must be the first one that matches at all
            let first = router
                .routes()
                .iter()
                .position(|r| r.method == route.method && r.pattern.matches(&path).is_some())
                .unwrap();
            assert_eq!(matched.index, first);
        }
    }

    #[test]
    fn test_head_only_registered_for_homepage() {
        let router = website_routes().unwrap();
        assert_eq!(
            router.parse_route(RouteMethod::Head, "/").unwrap().handler,
            HandlerId::Homepage
        );
        assert!(router.parse_route(RouteMethod::Head, "/status").is_err());
    }
}
