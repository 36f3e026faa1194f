//! Form payloads and their validation into domain values.
//!
//! Each form deserialises from `application/x-www-form-urlencoded` bodies
//! and validates into the matching domain type, reporting problems as
//! [`FormErrors`] keyed by form field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::domain::{ItemDraft, LoginCredentials, SignupCredentials};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_LOGIN: &str = "Please enter a correct username and password.";
pub const UNAVAILABLE: &str = "We could not save your changes. Please try again.";

/// Validation messages grouped by field, plus messages about the form as a
/// whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    /// Errors consisting of a single form-wide message.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push_non_field(message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn push_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Messages recorded against `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn non_field_messages(&self) -> &[String] {
        &self.non_field
    }
}

/// Login form body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginCredentials, FormErrors> {
        LoginCredentials::try_from_parts(&self.username, &self.password).map_err(|_| {
            let mut errors = FormErrors::default();
            if self.username.trim().is_empty() {
                errors.push("username", REQUIRED);
            }
            if self.password.is_empty() {
                errors.push("password", REQUIRED);
            }
            errors
        })
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Signup form body.
#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupCredentials, FormErrors> {
        SignupCredentials::try_from_parts(&self.username, &self.password1, &self.password2)
            .map_err(|err| {
                let mut errors = FormErrors::default();
                if let Some(username) = err.username {
                    errors.push("username", username.to_string());
                }
                for problem in err.password {
                    errors.push("password1", problem.to_string());
                }
                if let Some(confirmation) = err.password_confirmation {
                    errors.push("password2", confirmation.to_string());
                }
                errors
            })
    }
}

impl Drop for SignupForm {
    fn drop(&mut self) {
        self.password1.zeroize();
        self.password2.zeroize();
    }
}

/// Item add/edit form body. Fields are kept as submitted so the form can be
/// re-rendered verbatim.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

impl ItemForm {
    pub fn validate(&self) -> Result<ItemDraft, FormErrors> {
        ItemDraft::try_from_parts(&self.name, &self.price).map_err(|err| {
            let mut errors = FormErrors::default();
            if let Some(name) = err.name {
                errors.push("name", name.to_string());
            }
            if let Some(price) = err.price {
                errors.push("price", price.to_string());
            }
            errors
        })
    }
}
