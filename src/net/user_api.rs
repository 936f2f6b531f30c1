//! Account-service operations.
//!
//! Each call goes through the gateway, so it inherits session propagation
//! and failure notices, and then checks the envelope code: a 2xx whose
//! envelope is not success fails with the server's message.

#[cfg(test)]
#[path = "user_api_test.rs"]
mod user_api_test;

use std::rc::Rc;

use serde_json::Value;

use super::error::ApiError;
use super::gateway::HttpGateway;
use super::middleware::OutboundRequest;
use super::types::{LoginParams, RegisterParams, ResetPasswordParams, User};

pub const VERIFICATION_CODE_PATH: &str = "/api/user/verification-code";
pub const REGISTER_PATH: &str = "/api/user/register";
pub const LOGIN_PATH: &str = "/api/user/login";
pub const LOGOUT_PATH: &str = "/api/user/logout";
pub const RESET_PASSWORD_PATH: &str = "/api/user/reset-password";

#[derive(Clone)]
pub struct UserApi {
    gateway: Rc<HttpGateway>,
}

impl UserApi {
    pub fn new(gateway: Rc<HttpGateway>) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub fn gateway(&self) -> &HttpGateway {
        &self.gateway
    }

    /// Ask the server to email a verification code.
    ///
    /// # Errors
    ///
    /// Transport, status, or domain failure.
    pub async fn send_verification_code(&self, email: &str) -> Result<(), ApiError> {
        let req = OutboundRequest::get(VERIFICATION_CODE_PATH).query("email", email);
        self.gateway.call::<Value>(req).await?;
        tracing::info!(%email, "verification code requested");
        Ok(())
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Transport, status, or domain failure (e.g. email already registered).
    pub async fn register(&self, params: &RegisterParams) -> Result<(), ApiError> {
        let req = OutboundRequest::post(REGISTER_PATH).json(params)?;
        self.gateway.call::<Value>(req).await?;
        tracing::info!(username = %params.username, "account registered");
        Ok(())
    }

    /// Authenticate; the returned user carries the new session id.
    ///
    /// # Errors
    ///
    /// Transport, status, or domain failure; `Decode` when a success
    /// envelope has no user payload.
    pub async fn login(&self, params: &LoginParams) -> Result<User, ApiError> {
        let req = OutboundRequest::post(LOGIN_PATH).json(params)?;
        let user = self
            .gateway
            .call::<User>(req)
            .await?
            .ok_or_else(|| ApiError::Decode("login response has no user".to_owned()))?;
        tracing::info!(username = %user.username, "logged in");
        Ok(user)
    }

    /// End the server-side session.
    ///
    /// # Errors
    ///
    /// Transport, status, or domain failure.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.gateway.call::<Value>(OutboundRequest::post(LOGOUT_PATH)).await?;
        Ok(())
    }

    /// Set a new password using an emailed verification code.
    ///
    /// # Errors
    ///
    /// Transport, status, or domain failure (e.g. expired code).
    pub async fn reset_password(&self, params: &ResetPasswordParams) -> Result<(), ApiError> {
        let req = OutboundRequest::post(RESET_PASSWORD_PATH).json(params)?;
        self.gateway.call::<Value>(req).await?;
        tracing::info!(email = %params.email, "password reset");
        Ok(())
    }
}
