//! Login/logout flows that own the client session.
//!
//! SYSTEM CONTEXT
//! ==============
//! `UserApi` only talks to the server; this layer is where a login result
//! becomes a stored session and where logout guarantees the stored session
//! is gone, whether or not the server could be reached.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use crate::net::types::{LoginParams, User};
use crate::net::{ApiError, UserApi};
use crate::session::SessionStore;

pub struct AuthSession {
    api: UserApi,
    session: Rc<dyn SessionStore>,
}

impl AuthSession {
    pub fn new(api: UserApi, session: Rc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    #[must_use]
    pub fn api(&self) -> &UserApi {
        &self.api
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_present()
    }

    /// Log in and store the issued session id.
    ///
    /// # Errors
    ///
    /// Any `UserApi::login` failure, or `Decode` when the server reports
    /// success without a session id. Nothing is stored on failure.
    pub async fn login(&self, params: &LoginParams) -> Result<User, ApiError> {
        let user = self.api.login(params).await?;
        let session_id = user
            .session_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Decode("login response has no sessionId".to_owned()))?;
        self.session.set(session_id);
        Ok(user)
    }

    /// Log out remotely, then clear the stored session regardless of the
    /// remote outcome.
    ///
    /// # Errors
    ///
    /// Returns the remote call's failure after local cleanup has happened.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = self.api.logout().await;
        self.session.clear();
        if let Err(e) = &remote {
            tracing::warn!(error = %e, "remote logout failed; local session cleared");
        }
        remote
    }
}
