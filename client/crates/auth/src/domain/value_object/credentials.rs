//! Credentials and registration profile
//!
//! Checked client-side before anything is sent. A failed check is a
//! [`ValidationError`] for the caller to show inline; it never reaches the
//! session state.

use std::fmt;

use kernel::error::validation::{ValidationError, require_length, require_non_blank};
use serde::Serialize;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 50;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Username and password for a login attempt
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be present; strength rules only apply at registration
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("username", &self.username)?;
        require_non_blank("password", &self.password)?;
        Ok(())
    }

    /// Form fields of `POST /auth/login`
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.trim().to_string()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// New account details for `POST /auth/register`
#[derive(Clone, Serialize)]
pub struct RegisterProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl RegisterProfile {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_length(
            "username",
            self.username.trim(),
            USERNAME_MIN_LENGTH,
            USERNAME_MAX_LENGTH,
        )?;
        require_non_blank("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::new("email", "must be a valid email address"));
        }
        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(ValidationError::new(
                "password",
                format!("must be at least {PASSWORD_MIN_LENGTH} characters"),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}
