//! The `{code, message, data}` wrapper around every response body.
//!
//! A 2xx transport status only means the server answered. Whether the
//! operation succeeded is decided by `code`, and anything other than
//! `200` is a domain failure carrying the server's `message`.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// Known envelope codes issued by the account service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    ParamError,
    Unauthorized,
    Forbidden,
    NotFound,
    UserExisted,
    UserNotFound,
    PasswordError,
    EmailExisted,
    VerificationCodeError,
    SystemError,
}

impl ResultCode {
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            200 => Self::Success,
            400 => Self::ParamError,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            1001 => Self::UserExisted,
            1002 => Self::UserNotFound,
            1003 => Self::PasswordError,
            1004 => Self::EmailExisted,
            1005 => Self::VerificationCodeError,
            500 => Self::SystemError,
            _ => return None,
        })
    }

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Success => 200,
            Self::ParamError => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::UserExisted => 1001,
            Self::UserNotFound => 1002,
            Self::PasswordError => 1003,
            Self::EmailExisted => 1004,
            Self::VerificationCodeError => 1005,
            Self::SystemError => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success.code()
    }

    /// `Ok(data)` on success, `Err(Domain)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Domain` with the envelope's code and message when
    /// the code is not success.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Domain { code: self.code, message: self.message })
        }
    }
}

/// Decode a response body as an envelope and extract a typed payload.
///
/// The code is checked before `data` is interpreted, so a failure envelope
/// with an unexpected `data` shape still reports the server's message.
///
/// # Errors
///
/// `Decode` when the body is not an envelope or `data` does not match `T`;
/// `Domain` when the envelope code is not success.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<Option<T>, ApiError> {
    let envelope: Envelope<Value> =
        serde_json::from_value(body).map_err(|e| ApiError::Decode(format!("not an envelope: {e}")))?;
    match envelope.into_result()? {
        None | Some(Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|e| ApiError::Decode(format!("unexpected data: {e}"))),
    }
}

/// Pull a `message` string out of an error body, if there is one.
#[must_use]
pub fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}
