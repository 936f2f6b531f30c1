//! Request/response middleware chain.
//!
//! ARCHITECTURE
//! ============
//! Cross-cutting behavior (session propagation, failure classification) is
//! expressed as two ordered lists of transforms instead of being repeated at
//! each call site:
//!
//! - request interceptors: `OutboundRequest -> Result<OutboundRequest>`, run
//!   in registration order; the first error aborts the call before dispatch.
//! - response interceptors: `Result<InboundResponse> -> Result<InboundResponse>`,
//!   run in registration order, each seeing the previous one's output.

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;

use std::rc::Rc;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

use super::error::ApiError;

/// A request before it is handed to the transport.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Path relative to the gateway base URL, e.g. `/api/user/login`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl OutboundRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self { method, path: path.to_owned(), query: Vec::new(), headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when `body` cannot be serialized.
    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// A 2xx response as seen by the interceptors.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundResponse {
    pub status: u16,
    /// Parsed JSON body; `Null` when empty, a JSON string when not JSON.
    pub body: Value,
}

pub trait RequestInterceptor {
    /// Transform or reject an outgoing request.
    ///
    /// # Errors
    ///
    /// Any error aborts the call before it reaches the transport.
    fn on_request(&self, request: OutboundRequest) -> Result<OutboundRequest, ApiError>;
}

pub trait ResponseInterceptor {
    /// Observe or transform the outcome of a dispatched request.
    ///
    /// # Errors
    ///
    /// Returning `Err` rejects the call.
    fn on_response(&self, outcome: Result<InboundResponse, ApiError>) -> Result<InboundResponse, ApiError>;
}

#[derive(Default, Clone)]
pub struct Chain {
    request: Vec<Rc<dyn RequestInterceptor>>,
    response: Vec<Rc<dyn ResponseInterceptor>>,
}

impl Chain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_request(mut self, interceptor: Rc<dyn RequestInterceptor>) -> Self {
        self.request.push(interceptor);
        self
    }

    #[must_use]
    pub fn with_response(mut self, interceptor: Rc<dyn ResponseInterceptor>) -> Self {
        self.response.push(interceptor);
        self
    }

    /// Run every request interceptor in order.
    ///
    /// # Errors
    ///
    /// Returns the first interceptor error; later interceptors do not run.
    pub fn apply_request(&self, request: OutboundRequest) -> Result<OutboundRequest, ApiError> {
        self.request.iter().try_fold(request, |req, interceptor| interceptor.on_request(req))
    }

    /// Thread `outcome` through every response interceptor in order.
    ///
    /// # Errors
    ///
    /// Returns whatever error the last interceptor leaves in place.
    pub fn apply_response(&self, outcome: Result<InboundResponse, ApiError>) -> Result<InboundResponse, ApiError> {
        self.response.iter().fold(outcome, |acc, interceptor| interceptor.on_response(acc))
    }
}
