//! Static route descriptors.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table is built once at startup and never mutated. Each descriptor
//! carries the metadata the guard needs; the view name is an opaque handle
//! for whatever renders the page.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

/// Per-route metadata consulted by the guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only reachable with a stored session.
    pub requires_auth: bool,
    /// Only reachable without a stored session.
    pub requires_guest: bool,
    /// Page title shown while the route is active.
    pub title: Option<&'static str>,
}

impl RouteMeta {
    #[must_use]
    pub const fn auth(title: &'static str) -> Self {
        Self { requires_auth: true, requires_guest: false, title: Some(title) }
    }

    #[must_use]
    pub const fn guest(title: &'static str) -> Self {
        Self { requires_auth: false, requires_guest: true, title: Some(title) }
    }

    #[must_use]
    pub const fn public(title: &'static str) -> Self {
        Self { requires_auth: false, requires_guest: false, title: Some(title) }
    }
}

/// Unique route names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Login,
    Register,
    ResetPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: RouteName,
    pub view: &'static str,
    pub meta: RouteMeta,
}

/// Result of matching a path against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Route(&'a RouteDescriptor),
    /// No descriptor matched; the catch-all sends the navigation here.
    Redirect(&'static str),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    fallback: &'static str,
}

impl RouteTable {
    /// Build a table whose unmatched paths redirect to `fallback`.
    #[must_use]
    pub fn new(routes: Vec<RouteDescriptor>, fallback: &'static str) -> Self {
        Self { routes, fallback }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Match `path` exactly, ignoring one trailing slash on non-root paths.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolved<'_> {
        let normalized = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        self.routes
            .iter()
            .find(|route| route.path == normalized)
            .map_or(Resolved::Redirect(self.fallback), Resolved::Route)
    }

    #[must_use]
    pub fn by_name(&self, name: RouteName) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name == name)
    }
}

impl Default for RouteTable {
    /// Home (signed-in only), the three guest pages, and a catch-all to `/`.
    fn default() -> Self {
        Self::new(
            vec![
                RouteDescriptor {
                    path: "/",
                    name: RouteName::Home,
                    view: "HomePage",
                    meta: RouteMeta::auth("Home"),
                },
                RouteDescriptor {
                    path: "/login",
                    name: RouteName::Login,
                    view: "LoginPage",
                    meta: RouteMeta::guest("Login"),
                },
                RouteDescriptor {
                    path: "/register",
                    name: RouteName::Register,
                    view: "RegisterPage",
                    meta: RouteMeta::guest("Register"),
                },
                RouteDescriptor {
                    path: "/reset-password",
                    name: RouteName::ResetPassword,
                    view: "ResetPasswordPage",
                    meta: RouteMeta::guest("Reset Password"),
                },
            ],
            "/",
        )
    }
}
