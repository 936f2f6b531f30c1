//! User-facing notices raised by the HTTP layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The response interceptor reports connectivity and HTTP-status failures
//! here before propagating them. Domain failures (a 2xx response whose
//! envelope code is not success) are left to the caller.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::RefCell;
use std::fmt;

/// Fallback text when the server gave no usable message.
pub const GENERIC_FAILURE: &str = "Operation failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No response reached the client (offline, refused, timed out).
    Connectivity,
    PermissionDenied,
    NotFound,
    ServerError,
    /// Any other failure, with the server's message or the generic text.
    Failure(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connectivity => f.write_str("Network error, please check your connection"),
            Self::PermissionDenied => f.write_str("You do not have permission to perform this action"),
            Self::NotFound => f.write_str("The requested resource does not exist"),
            Self::ServerError => f.write_str("Server error, please try again later"),
            Self::Failure(message) => f.write_str(message),
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Emits notices as `warn` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{notice}");
    }
}

/// Records notices in order; also forwards them to `tracing`.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        TracingNotifier.notify(notice.clone());
        self.notices.borrow_mut().push(notice);
    }
}
