//! Client-side form checks mirroring the account service's field rules.
//!
//! These run before a form is submitted so obvious mistakes are reported
//! without a round trip. The server stays the authority: `UserApi` never
//! calls into this module.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::net::types::{LoginParams, RegisterParams, ResetPasswordParams, Sex};

pub const USERNAME_MIN: usize = 4;
pub const USERNAME_MAX: usize = 32;
pub const PASSWORD_MIN: usize = 8;
pub const VERIFICATION_CODE_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Check a registration form.
///
/// # Errors
///
/// The first field that fails its rule.
pub fn register(params: &RegisterParams) -> Result<(), ValidationError> {
    username(&params.username)?;
    password("password", &params.password)?;
    email(&params.email)?;
    if Sex::from_code(&params.sex).is_none() {
        return Err(ValidationError::new("sex", "must be M or F"));
    }
    verification_code(&params.verification_code)
}

/// Check a login form.
///
/// # Errors
///
/// A blank username or password.
pub fn login(params: &LoginParams) -> Result<(), ValidationError> {
    not_blank("username", &params.username)?;
    not_blank("password", &params.password)
}

/// Check a password-reset form.
///
/// # Errors
///
/// The first field that fails its rule.
pub fn reset_password(params: &ResetPasswordParams) -> Result<(), ValidationError> {
    email(&params.email)?;
    verification_code(&params.verification_code)?;
    password("newPassword", &params.new_password)
}

/// Username must be 4 to 32 characters.
///
/// # Errors
///
/// Blank or out-of-range length.
pub fn username(raw: &str) -> Result<(), ValidationError> {
    not_blank("username", raw)?;
    let len = raw.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(ValidationError::new(
            "username",
            format!("must be {USERNAME_MIN}-{USERNAME_MAX} characters"),
        ));
    }
    Ok(())
}

/// At least eight ASCII letters/digits, with a lowercase, an uppercase, and
/// a digit.
///
/// # Errors
///
/// Any rule violation, reported under `field`.
pub fn password(field: &'static str, raw: &str) -> Result<(), ValidationError> {
    not_blank(field, raw)?;
    let strong = raw.len() >= PASSWORD_MIN
        && raw.chars().all(|c| c.is_ascii_alphanumeric())
        && raw.chars().any(|c| c.is_ascii_lowercase())
        && raw.chars().any(|c| c.is_ascii_uppercase())
        && raw.chars().any(|c| c.is_ascii_digit());
    if !strong {
        return Err(ValidationError::new(
            field,
            format!("must be at least {PASSWORD_MIN} letters and digits with upper case, lower case, and a digit"),
        ));
    }
    Ok(())
}

/// Loose `local@domain.tld` shape check.
///
/// # Errors
///
/// Blank or malformed address.
pub fn email(raw: &str) -> Result<(), ValidationError> {
    not_blank("email", raw)?;
    let malformed = || ValidationError::new("email", "is not a valid address");
    let (local, domain) = raw.split_once('@').ok_or_else(malformed)?;
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if local.is_empty() || domain.contains('@') || raw.chars().any(char::is_whitespace) || !domain_ok {
        return Err(malformed());
    }
    Ok(())
}

/// Exactly six characters.
///
/// # Errors
///
/// Blank or wrong length.
pub fn verification_code(raw: &str) -> Result<(), ValidationError> {
    not_blank("verificationCode", raw)?;
    if raw.chars().count() != VERIFICATION_CODE_LEN {
        return Err(ValidationError::new(
            "verificationCode",
            format!("must be {VERIFICATION_CODE_LEN} characters"),
        ));
    }
    Ok(())
}

fn not_blank(field: &'static str, raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}
