//! HTTP gateway: one dispatch path for every account-service call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Call sites build an `OutboundRequest`; the gateway runs the request
//! interceptors, dispatches through `reqwest` with a fixed timeout, and
//! hands the outcome to the response interceptors. `call` then unwraps the
//! application envelope, so a 2xx with a failing `code` still rejects.
//!
//! ERROR HANDLING
//! ==============
//! Anything that prevents a response from arriving (refused connection,
//! DNS, timeout, truncated body) becomes `ApiError::Transport`. A received
//! non-2xx becomes `ApiError::Status`. Nothing is retried.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::{self, ResultCode, body_message};
use super::error::ApiError;
use super::interceptors::{SessionHeader, StatusClassifier};
use super::middleware::{Chain, InboundResponse, OutboundRequest};
use crate::config::PortalConfig;
use crate::notify::Notifier;
use crate::routing::LoginRedirect;
use crate::session::SessionStore;

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    chain: Chain,
}

impl HttpGateway {
    /// Build a gateway with the standard chain: session header out,
    /// status classification in.
    ///
    /// # Errors
    ///
    /// Returns `ClientBuild` if the HTTP client cannot be constructed.
    pub fn new(
        config: &PortalConfig,
        session: Rc<dyn SessionStore>,
        notifier: Rc<dyn Notifier>,
        redirect: Rc<dyn LoginRedirect>,
    ) -> Result<Self, ApiError> {
        let chain = Chain::new()
            .with_request(Rc::new(SessionHeader::new(session.clone())))
            .with_response(Rc::new(StatusClassifier::new(session, notifier, redirect)));
        Self::with_chain(config, chain)
    }

    /// Build a gateway around a caller-assembled chain.
    ///
    /// # Errors
    ///
    /// Returns `ClientBuild` if the HTTP client cannot be constructed.
    pub fn with_chain(config: &PortalConfig, chain: Chain) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned(), chain })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `request` through the chain and the transport.
    ///
    /// # Errors
    ///
    /// Any request-interceptor rejection, transport failure, or non-2xx
    /// status, after the response interceptors have seen it.
    pub async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, ApiError> {
        let request = self.chain.apply_request(request)?;
        let outcome = self.dispatch(request).await;
        self.chain.apply_response(outcome)
    }

    /// Send and unwrap the response envelope.
    ///
    /// # Errors
    ///
    /// Everything `send` can return, plus `Domain` when the envelope code
    /// is not success and `Decode` when the body is not a valid envelope.
    pub async fn call<T: DeserializeOwned>(&self, request: OutboundRequest) -> Result<Option<T>, ApiError> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        envelope::decode(response.body).inspect_err(|e| {
            if let ApiError::Domain { code, message } = e {
                let kind = ResultCode::from_code(*code);
                tracing::info!(%path, code, ?kind, %message, "request rejected by service");
            }
        })
    }

    async fn dispatch(&self, request: OutboundRequest) -> Result<InboundResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = %request.method, %url, "dispatching request");

        let mut builder = self.http.request(request.method, &url).headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;
        let body = parse_body(&text);

        if !(200..300).contains(&status) {
            tracing::debug!(%url, status, "non-success status");
            return Err(ApiError::Status { status, message: body_message(&body) });
        }
        Ok(InboundResponse { status, body })
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Transport(format!("request timed out: {e}"))
    } else {
        ApiError::Transport(e.to_string())
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}
