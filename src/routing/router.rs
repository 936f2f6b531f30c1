//! Navigation driver.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation runs the same pipeline: resolve the catch-all, publish
//! the matched route's title, consult the guard, and either commit or follow
//! the redirect as a fresh guarded navigation. The HTTP layer reaches the
//! router through `LoginRedirect` when the server rejects the session.
//!
//! The session store is read at evaluation time, never cached, so a 401
//! handler that clears the store before redirecting is always observed by
//! the very next guard run.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::guard::{self, Outcome};
use super::location::{Location, REDIRECT_PARAM};
use super::table::{Resolved, RouteName, RouteTable};
use crate::session::SessionStore;

/// Redirect hops allowed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation to {target} exceeded {max} redirects", max = MAX_REDIRECTS)]
    RedirectLoop { target: String },

    #[error("route table has no {0:?} route")]
    MissingRoute(RouteName),
}

/// A committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub location: Location,
    pub route: RouteName,
    /// Full path originally requested, when a redirect changed it.
    pub redirected_from: Option<String>,
}

/// Sends the user to the login page, remembering where they were.
pub trait LoginRedirect {
    fn redirect_to_login(&self);
}

pub struct Router {
    table: RouteTable,
    session: Rc<dyn SessionStore>,
    app_title: String,
    current: RefCell<Location>,
    title: RefCell<String>,
}

impl Router {
    pub fn new(table: RouteTable, session: Rc<dyn SessionStore>, app_title: impl Into<String>) -> Self {
        let app_title = app_title.into();
        Self {
            table,
            session,
            title: RefCell::new(app_title.clone()),
            app_title,
            current: RefCell::new(Location::with_path("/")),
        }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn current(&self) -> Location {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn current_full_path(&self) -> String {
        self.current.borrow().full_path()
    }

    /// Title of the most recently evaluated route.
    #[must_use]
    pub fn document_title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Navigate to `target` (`path?query`), following guard redirects.
    ///
    /// The title is updated for every route the guard evaluates, before the
    /// guard's decision is applied.
    ///
    /// # Errors
    ///
    /// Returns `RedirectLoop` when redirects do not settle within
    /// `MAX_REDIRECTS` hops, or `MissingRoute` when a redirect names a route
    /// the table does not define.
    pub fn navigate(&self, target: &str) -> Result<Navigation, NavigationError> {
        let requested = Location::parse(target);
        let mut next = requested.clone();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let route = match self.table.resolve(&next.path) {
                Resolved::Route(route) => route,
                Resolved::Redirect(to) => {
                    redirected_from.get_or_insert_with(|| requested.full_path());
                    next = Location { path: to.to_owned(), query: next.query };
                    continue;
                }
            };

            *self.title.borrow_mut() = guard::page_title(&route.meta, &self.app_title);

            let full_path = next.full_path();
            match guard::evaluate(&route.meta, &full_path, self.session.is_present()) {
                Outcome::Allow => {
                    tracing::debug!(path = %full_path, route = ?route.name, "navigation committed");
                    *self.current.borrow_mut() = next.clone();
                    return Ok(Navigation { location: next, route: route.name, redirected_from });
                }
                Outcome::RedirectToLogin { redirect } => {
                    tracing::debug!(from = %full_path, "guard: sign-in required");
                    next = self.login_location(Some(&redirect))?;
                }
                Outcome::RedirectToHome => {
                    tracing::debug!(from = %full_path, "guard: already signed in");
                    next = self.named(RouteName::Home)?;
                }
            }
            redirected_from.get_or_insert_with(|| requested.full_path());
        }

        Err(NavigationError::RedirectLoop { target: requested.full_path() })
    }

    /// The login route, carrying `return_to` as its `redirect` value.
    ///
    /// # Errors
    ///
    /// Returns `MissingRoute` when the table has no login route.
    pub fn login_location(&self, return_to: Option<&str>) -> Result<Location, NavigationError> {
        let login = self.named(RouteName::Login)?;
        Ok(match return_to {
            Some(target) => login.with_query(REDIRECT_PARAM, target),
            None => login,
        })
    }

    fn named(&self, name: RouteName) -> Result<Location, NavigationError> {
        self.table
            .by_name(name)
            .map(|route| Location::with_path(route.path))
            .ok_or(NavigationError::MissingRoute(name))
    }
}

impl LoginRedirect for Router {
    fn redirect_to_login(&self) {
        let return_to = self.current_full_path();
        let target = match self.login_location(Some(&return_to)) {
            Ok(login) => login,
            Err(e) => {
                tracing::warn!(error = %e, "cannot redirect to login");
                return;
            }
        };
        if let Err(e) = self.navigate(&target.full_path()) {
            tracing::warn!(error = %e, "login redirect failed");
        }
    }
}
