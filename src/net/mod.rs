//! HTTP access to the account service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `UserApi` exposes the domain calls, `HttpGateway` owns dispatch and the
//! interceptor chain, and `envelope` decides domain success.

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod interceptors;
pub mod middleware;
pub mod types;
pub mod user_api;

pub use error::ApiError;
pub use gateway::HttpGateway;
pub use interceptors::{SESSION_HEADER, SessionHeader, StatusClassifier};
pub use middleware::{Chain, InboundResponse, OutboundRequest, RequestInterceptor, ResponseInterceptor};
pub use user_api::UserApi;
