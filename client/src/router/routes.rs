//! Dashboard route table and path resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table here is the single source of route names, path patterns, and
//! access metadata. `app::App` mounts one view per entry and the guard chain
//! reads the metadata of whatever [`resolve`] returns.
//!
//! Pattern syntax: `name` matches a literal segment, `:id` captures one
//! segment, and a trailing `:path*` captures every remaining segment (zero or
//! more), joined with `/`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::BTreeMap;

/// Path the bare root redirects to, and the default post-login landing.
pub const LANDING_PATH: &str = "/dashboard";
/// Query key carrying the path to restore after login.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteName {
    Login,
    TelegramAuth,
    Dashboard,
    Projects,
    ProjectDetail,
    ProjectTree,
    ProjectCommits,
    Scripts,
    ScriptExecutions,
    Notifications,
    Admin,
    NotFound,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::TelegramAuth => "telegram-auth",
            Self::Dashboard => "dashboard",
            Self::Projects => "projects",
            Self::ProjectDetail => "project-detail",
            Self::ProjectTree => "project-tree",
            Self::ProjectCommits => "project-commits",
            Self::Scripts => "scripts",
            Self::ScriptExecutions => "script-executions",
            Self::Notifications => "notifications",
            Self::Admin => "admin",
            Self::NotFound => "not-found",
        }
    }

    /// Table entry for this name.
    #[must_use]
    pub fn record(self) -> &'static RouteRecord {
        ROUTES.iter().find(|r| r.name == self).unwrap_or(&NOT_FOUND)
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access flags and display hints attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Only reachable while signed out (login screens).
    pub requires_guest: bool,
    pub requires_admin: bool,
    pub title: Option<&'static str>,
    pub breadcrumb: Option<&'static str>,
}

impl RouteMeta {
    const fn guest(title: &'static str) -> Self {
        Self { requires_auth: false, requires_guest: true, requires_admin: false, title: Some(title), breadcrumb: None }
    }

    const fn auth(title: &'static str, breadcrumb: &'static str) -> Self {
        Self {
            requires_auth: true,
            requires_guest: false,
            requires_admin: false,
            title: Some(title),
            breadcrumb: Some(breadcrumb),
        }
    }

    const fn admin(title: &'static str, breadcrumb: &'static str) -> Self {
        Self { requires_admin: true, ..Self::auth(title, breadcrumb) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub pattern: &'static str,
    pub name: RouteName,
    pub meta: RouteMeta,
}

const NOT_FOUND: RouteRecord = RouteRecord {
    pattern: "/:path_match*",
    name: RouteName::NotFound,
    meta: RouteMeta {
        requires_auth: false,
        requires_guest: false,
        requires_admin: false,
        title: Some("Not found"),
        breadcrumb: None,
    },
};

/// Every named route, most specific first; the last entry catches all.
pub static ROUTES: [RouteRecord; 12] = [
    RouteRecord { pattern: "/login", name: RouteName::Login, meta: RouteMeta::guest("Sign in") },
    RouteRecord {
        pattern: "/auth/telegram/:token",
        name: RouteName::TelegramAuth,
        meta: RouteMeta::guest("Telegram sign in"),
    },
    RouteRecord { pattern: "/dashboard", name: RouteName::Dashboard, meta: RouteMeta::auth("Dashboard", "Dashboard") },
    RouteRecord { pattern: "/projects", name: RouteName::Projects, meta: RouteMeta::auth("Projects", "Projects") },
    RouteRecord {
        pattern: "/projects/:id",
        name: RouteName::ProjectDetail,
        meta: RouteMeta::auth("Project", "Project"),
    },
    RouteRecord {
        pattern: "/projects/:id/tree/:path*",
        name: RouteName::ProjectTree,
        meta: RouteMeta::auth("Files", "Files"),
    },
    RouteRecord {
        pattern: "/projects/:id/commits",
        name: RouteName::ProjectCommits,
        meta: RouteMeta::auth("Commits", "Commits"),
    },
    RouteRecord { pattern: "/scripts", name: RouteName::Scripts, meta: RouteMeta::auth("Scripts", "Scripts") },
    RouteRecord {
        pattern: "/scripts/:id/executions",
        name: RouteName::ScriptExecutions,
        meta: RouteMeta::auth("Executions", "Executions"),
    },
    RouteRecord {
        pattern: "/notifications",
        name: RouteName::Notifications,
        meta: RouteMeta::auth("Notifications", "Notifications"),
    },
    RouteRecord { pattern: "/admin", name: RouteName::Admin, meta: RouteMeta::admin("Administration", "Admin") },
    NOT_FOUND,
];

/// Paths that redirect before any route is matched.
#[must_use]
pub fn static_redirect(path: &str) -> Option<&'static str> {
    match path {
        "" | "/" => Some(LANDING_PATH),
        _ => None,
    }
}

/// A concrete navigation target: the matched route plus everything parsed
/// out of the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: RouteName,
    /// Path without the query string.
    pub path: String,
    /// Path plus query string, exactly as navigated to.
    pub full_path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub meta: RouteMeta,
}

impl ResolvedRoute {
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), std::borrow::Cow::into_owned)
}

/// Parse a query string (without the leading `?`) into decoded pairs.
/// Later duplicates win; keys without `=` map to an empty value.
#[must_use]
pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let parts = split_segments(pattern);
    let mut params = BTreeMap::new();

    for (i, part) in parts.iter().enumerate() {
        if let Some(name) = part.strip_prefix(':') {
            if let Some(rest_name) = name.strip_suffix('*') {
                // Catch-all must be the last pattern segment.
                if i + 1 != parts.len() {
                    return None;
                }
                let rest = segments.get(i..).unwrap_or_default();
                params.insert(rest_name.to_owned(), rest.iter().map(|s| decode(s)).collect::<Vec<_>>().join("/"));
                return Some(params);
            }
            let segment = segments.get(i)?;
            params.insert(name.to_owned(), decode(segment));
        } else if segments.get(i) != Some(part) {
            return None;
        }
    }

    (segments.len() == parts.len()).then_some(params)
}

/// Match `full_path` (path plus optional `?query`) against the table.
/// Unknown paths resolve to [`RouteName::NotFound`].
#[must_use]
pub fn resolve(full_path: &str) -> ResolvedRoute {
    let (path, raw_query) = full_path.split_once('?').unwrap_or((full_path, ""));
    let segments = split_segments(path);

    let (record, params) = ROUTES
        .iter()
        .find_map(|record| match_pattern(record.pattern, &segments).map(|params| (record, params)))
        .unwrap_or((&NOT_FOUND, BTreeMap::new()));

    ResolvedRoute {
        name: record.name,
        path: path.to_owned(),
        full_path: full_path.to_owned(),
        params,
        query: parse_query(raw_query),
        meta: record.meta,
    }
}

/// Build the login URL that restores `full_path` after sign-in.
#[must_use]
pub fn login_path_with_redirect(full_path: &str) -> String {
    format!("/login?{REDIRECT_QUERY_KEY}={}", urlencoding::encode(full_path))
}

/// Whether `path` is a same-origin path safe to redirect to.
#[must_use]
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
