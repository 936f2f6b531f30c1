//! Built-in interceptors: session propagation and failure classification.

#[cfg(test)]
#[path = "interceptors_test.rs"]
mod interceptors_test;

use std::rc::Rc;

use reqwest::header::{HeaderName, HeaderValue};

use super::error::ApiError;
use super::middleware::{InboundResponse, OutboundRequest, RequestInterceptor, ResponseInterceptor};
use crate::notify::{GENERIC_FAILURE, Notice, Notifier};
use crate::routing::LoginRedirect;
use crate::session::SessionStore;

/// Request header carrying the stored session id.
pub const SESSION_HEADER: &str = "x-session-id";

// =============================================================================
// SESSION HEADER
// =============================================================================

/// Stamps outbound requests with the stored session id, if any.
pub struct SessionHeader {
    session: Rc<dyn SessionStore>,
}

impl SessionHeader {
    pub fn new(session: Rc<dyn SessionStore>) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for SessionHeader {
    fn on_request(&self, mut request: OutboundRequest) -> Result<OutboundRequest, ApiError> {
        let Some(token) = self.session.get() else {
            return Ok(request);
        };
        let value = HeaderValue::from_str(&token)
            .map_err(|e| ApiError::InvalidRequest(format!("session id is not a valid header value: {e}")))?;
        request.headers.insert(HeaderName::from_static(SESSION_HEADER), value);
        Ok(request)
    }
}

// =============================================================================
// STATUS CLASSIFIER
// =============================================================================

/// Turns transport and HTTP-status failures into user notices.
///
/// A 401 additionally drops the stored session and sends the user to login,
/// in that order, so the login route's guard already sees no session.
/// Every failure is still propagated to the caller.
pub struct StatusClassifier {
    session: Rc<dyn SessionStore>,
    notifier: Rc<dyn Notifier>,
    redirect: Rc<dyn LoginRedirect>,
}

impl StatusClassifier {
    pub fn new(session: Rc<dyn SessionStore>, notifier: Rc<dyn Notifier>, redirect: Rc<dyn LoginRedirect>) -> Self {
        Self { session, notifier, redirect }
    }

    fn classify(&self, err: &ApiError) {
        match err {
            ApiError::Transport(reason) => {
                tracing::warn!(%reason, "no response from server");
                self.notifier.notify(Notice::Connectivity);
            }
            ApiError::Status { status: 401, .. } => {
                tracing::info!("session rejected by server; signing out");
                self.session.clear();
                self.redirect.redirect_to_login();
            }
            ApiError::Status { status: 403, .. } => self.notifier.notify(Notice::PermissionDenied),
            ApiError::Status { status: 404, .. } => self.notifier.notify(Notice::NotFound),
            ApiError::Status { status: 500, .. } => self.notifier.notify(Notice::ServerError),
            ApiError::Status { message, .. } => {
                let text = message.clone().unwrap_or_else(|| GENERIC_FAILURE.to_owned());
                self.notifier.notify(Notice::Failure(text));
            }
            ApiError::Domain { .. }
            | ApiError::Decode(_)
            | ApiError::InvalidRequest(_)
            | ApiError::ClientBuild(_) => {}
        }
    }
}

impl ResponseInterceptor for StatusClassifier {
    fn on_response(&self, outcome: Result<InboundResponse, ApiError>) -> Result<InboundResponse, ApiError> {
        if let Err(err) = &outcome {
            self.classify(err);
        }
        outcome
    }
}
