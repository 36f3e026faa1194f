//! Authentication primitives: login and signup credentials.
//!
//! Handlers build these from raw form strings; constructors validate before
//! any port or service sees the values. Plain passwords live in
//! [`Zeroizing`] buffers so they are wiped when the request finishes.

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Login payload problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use pricebook::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "s3cret-pass").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Password policy violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    #[error("This field is required.")]
    Empty,
    #[error("This password is too short. It must contain at least {min} characters.")]
    TooShort { min: usize },
    #[error("This password is entirely numeric.")]
    EntirelyNumeric,
    #[error("The password is too similar to the username.")]
    SameAsUsername,
    #[error("The two password fields didn't match.")]
    Mismatch,
}

/// Every problem found in a signup submission, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupValidationError {
    pub username: Option<UserValidationError>,
    pub password: Vec<PasswordValidationError>,
    pub password_confirmation: Option<PasswordValidationError>,
}

impl SignupValidationError {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_empty() && self.password_confirmation.is_none()
    }
}

/// Validated signup request.
///
/// # Examples
/// ```
/// use pricebook::domain::SignupCredentials;
///
/// let ok = SignupCredentials::try_from_parts("alice", "tulip-garden-42", "tulip-garden-42");
/// assert!(ok.is_ok());
/// let err = SignupCredentials::try_from_parts("alice", "tulip-garden-42", "other").unwrap_err();
/// assert!(err.password_confirmation.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Validate a signup submission, collecting all field errors at once.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, SignupValidationError> {
        let mut errors = SignupValidationError::default();

        let username = match Username::new(username) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.username = Some(err);
                None
            }
        };

        if password.is_empty() {
            errors.password.push(PasswordValidationError::Empty);
        } else {
            errors.password = password_policy_violations(password, username.as_ref());
        }

        if confirmation.is_empty() {
            errors.password_confirmation = Some(PasswordValidationError::Empty);
        } else if !password.is_empty() && password != confirmation {
            errors.password_confirmation = Some(PasswordValidationError::Mismatch);
        }

        match username {
            Some(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

fn password_policy_violations(
    password: &str,
    username: Option<&Username>,
) -> Vec<PasswordValidationError> {
    let mut violations = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        violations.push(PasswordValidationError::TooShort {
            min: PASSWORD_MIN_LEN,
        });
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        violations.push(PasswordValidationError::EntirelyNumeric);
    }
    if username.is_some_and(|name| name.as_ref().eq_ignore_ascii_case(password)) {
        violations.push(PasswordValidationError::SameAsUsername);
    }
    violations
}
