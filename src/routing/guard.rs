//! Navigation guard.
//!
//! A pure function of route metadata and session presence. It performs no
//! I/O and never suspends; the router owns the side effects.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::table::RouteMeta;

/// Decision for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    /// Send the user to login; `redirect` is the full path they asked for.
    RedirectToLogin { redirect: String },
    RedirectToHome,
}

/// Decide whether a navigation to `target_full_path` may proceed.
///
/// | guest-only | auth-only | session | outcome |
/// |---|---|---|---|
/// | yes | - | present | home |
/// | - | yes | absent | login, carrying the target |
/// | otherwise | | | allow |
#[must_use]
pub fn evaluate(meta: &RouteMeta, target_full_path: &str, session_present: bool) -> Outcome {
    if meta.requires_guest && session_present {
        return Outcome::RedirectToHome;
    }
    if meta.requires_auth && !session_present {
        return Outcome::RedirectToLogin { redirect: target_full_path.to_owned() };
    }
    Outcome::Allow
}

/// Document title for a route: `"{title} - {app}"`, or just `app`.
#[must_use]
pub fn page_title(meta: &RouteMeta, app_title: &str) -> String {
    match meta.title {
        Some(title) => format!("{title} - {app_title}"),
        None => app_title.to_owned(),
    }
}
