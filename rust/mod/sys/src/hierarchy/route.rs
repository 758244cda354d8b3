use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::model::MenuTree;

use super::Forest;

/// Path of the entry appended to every route set.
pub const CATCH_ALL_PATH: &str = "*";

/// Where the console sends unauthenticated and unmatched requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    pub login_path: String,
    pub landing_path: String,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            landing_path: "/dashboard".to_string(),
        }
    }
}

/// One client-side route definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<u64>,
    /// Named page component for built-in routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exact: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    fn catch_all(options: &RouteOptions) -> Self {
        Self {
            path: CATCH_ALL_PATH.to_string(),
            redirect: Some(options.landing_path.clone()),
            ..Default::default()
        }
    }
}

/// Built-in route set used before a principal is known.
pub fn fallback_routes(options: &RouteOptions) -> Vec<RouteEntry> {
    let landing = options.landing_path.trim_start_matches('/');
    vec![
        RouteEntry {
            path: options.login_path.clone(),
            element: Some("Login".to_string()),
            exact: true,
            ..Default::default()
        },
        RouteEntry {
            path: "/".to_string(),
            element: Some("MainLayout".to_string()),
            protected: true,
            children: vec![RouteEntry {
                path: landing.to_string(),
                element: Some("Dashboard".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        },
    ]
}

/// Route set for `granted`, or the fallback set when no principal is known.
///
/// A node is emitted only if it is navigable and granted; an ungranted node
/// hides its whole subtree. The catch-all entry always comes last.
pub fn project_routes(
    forest: &Forest,
    granted: Option<&BTreeSet<u64>>,
    options: &RouteOptions,
) -> Vec<RouteEntry> {
    let mut routes = match granted {
        Some(granted) => project_level(forest.roots(), granted),
        None => fallback_routes(options),
    };
    debug!(
        routes = routes.len(),
        principal = granted.is_some(),
        "projected routes"
    );
    routes.push(RouteEntry::catch_all(options));
    routes
}

fn project_level(trees: &[MenuTree], granted: &BTreeSet<u64>) -> Vec<RouteEntry> {
    trees
        .iter()
        .filter(|t| t.node.kind.is_navigable() && granted.contains(&t.id()))
        .map(|t| RouteEntry {
            path: t.node.url.clone(),
            name: Some(t.node.name.clone()),
            menu_id: Some(t.id()),
            protected: true,
            children: project_level(&t.children, granted),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_forest;
    use crate::hierarchy::fixtures::scenario;

    fn paths(routes: &[RouteEntry]) -> Vec<&str> {
        routes.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_dashboard_only_grant() {
        let forest = build_forest(scenario()).unwrap();
        let granted = [1].into_iter().collect();
        let routes = project_routes(&forest, Some(&granted), &RouteOptions::default());

        assert_eq!(paths(&routes), vec!["/dashboard", "*"]);
        assert_eq!(routes[0].name.as_deref(), Some("Dashboard"));
        assert_eq!(routes[0].menu_id, Some(1));
        assert!(routes[0].protected);
        assert_eq!(routes[1].redirect.as_deref(), Some("/dashboard"));
    }

    #[test]
    fn test_buttons_and_ungranted_subtrees_are_hidden() {
        let forest = build_forest(scenario()).unwrap();

        let all = [1, 2, 3, 4].into_iter().collect();
        let routes = project_routes(&forest, Some(&all), &RouteOptions::default());
        assert_eq!(paths(&routes), vec!["/dashboard", "/system", "*"]);
        assert_eq!(paths(&routes[1].children), vec!["/system/user"]);
        assert!(routes[1].children[0].children.is_empty());

        // Users granted without its parent stays hidden.
        let orphaned = [3, 4].into_iter().collect();
        let routes = project_routes(&forest, Some(&orphaned), &RouteOptions::default());
        assert_eq!(paths(&routes), vec!["*"]);
    }

    #[test]
    fn test_fallback_without_principal() {
        let forest = build_forest(scenario()).unwrap();
        let routes = project_routes(&forest, None, &RouteOptions::default());

        assert_eq!(paths(&routes), vec!["/login", "/", "*"]);
        assert!(routes[0].exact);
        assert!(!routes[0].protected);
        assert_eq!(routes[1].element.as_deref(), Some("MainLayout"));
        assert!(routes[1].protected);
        assert_eq!(paths(&routes[1].children), vec!["dashboard"]);
    }

    #[test]
    fn test_wire_format_skips_empty_fields() {
        let json = serde_json::to_value(RouteEntry::catch_all(&RouteOptions {
            login_path: "/signin".into(),
            landing_path: "/home".into(),
        }))
        .unwrap();
        assert_eq!(json, serde_json::json!({"path": "*", "redirect": "/home"}));
    }
}
