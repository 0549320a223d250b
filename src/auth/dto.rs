use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a login was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthFailureReason {
    NotFound,
    Blocked,
}

impl fmt::Display for AuthFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthFailureReason::NotFound => "no user with these credentials",
            AuthFailureReason::Blocked => "user is blocked",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("login rejected: {reason}")]
pub struct AuthFailure {
    pub reason: AuthFailureReason,
}

impl AuthFailure {
    pub fn not_found() -> Self {
        Self {
            reason: AuthFailureReason::NotFound,
        }
    }

    pub fn blocked() -> Self {
        Self {
            reason: AuthFailureReason::Blocked,
        }
    }
}

/// Registration form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegistrationDraft {
    /// Apply one input event by field name. Returns false for unknown fields.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "password" => &mut self.password,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// True when no field has been filled in at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.password.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Login form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginDraft {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginDraft {
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "email" => &mut self.email,
            "password" => &mut self.password,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_draft_fills_field_by_field() {
        let mut draft = RegistrationDraft::default();
        assert!(draft.is_empty());
        assert!(draft.set_field("password", "   "));
        assert!(!draft.is_empty());
        assert!(draft.set_field("name", "Bob"));
        assert!(draft.set_field("email", "b@x.com"));
        assert!(!draft.set_field("age", "40"));
        assert_eq!(draft.password, "   ");

        draft.clear();
        assert_eq!(draft, RegistrationDraft::default());
        assert!(draft.is_empty());
    }

    #[test]
    fn login_draft_ignores_unknown_fields() {
        let mut draft = LoginDraft::default();
        assert!(draft.set_field("email", "a@x.com"));
        assert!(!draft.set_field("name", "Ann"));
        assert_eq!(draft.email, "a@x.com");
        assert!(draft.password.is_empty());
    }

    #[test]
    fn failure_serializes_with_reason() {
        let json = serde_json::to_string(&AuthFailure::blocked()).unwrap();
        assert_eq!(json, r#"{"reason":"Blocked"}"#);
    }
}
