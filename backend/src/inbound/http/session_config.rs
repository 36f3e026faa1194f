//! Session cookie settings read from the environment.
//!
//! Debug builds tolerate missing or malformed toggles and fall back to safe
//! defaults with a warning. Release builds insist on every toggle being set
//! explicitly and on a key file of at least [`SESSION_KEY_MIN_LEN`] bytes.

use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length; debug builds replace shorter keys.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Lifetime of a login session when `SESSION_TTL_SECS` is unset.
pub const SESSION_TTL_DEFAULT: Duration = Duration::from_secs(2 * 60 * 60);

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const TTL_ENV: &str = "SESSION_TTL_SECS";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "a positive number of seconds";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or malformed toggles fall back to defaults.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for the private session cookie.
    pub key: Key,
    /// Whether the cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for the cookie.
    pub same_site: SameSite,
    /// How long a login stays valid.
    pub ttl: Duration,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use pricebook::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_ALLOW_EPHEMERAL" => Some("1".to_owned()),
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = EnvReader { env, mode };
    let cookie_secure = reader.toggle(COOKIE_SECURE_ENV, true)?;
    let same_site = reader.same_site(cookie_secure)?;
    let allow_ephemeral = reader.toggle(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let ttl = reader.ttl()?;
    let key = reader.key(allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl,
    })
}

struct EnvReader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> EnvReader<'_, E> {
    /// Look up a toggle. Missing toggles yield `None` in debug builds.
    fn lookup(&self, name: &'static str) -> Result<Option<String>, SessionConfigError> {
        match self.env.string(name) {
            Some(value) => Ok(Some(value)),
            None if self.mode.is_debug() => {
                warn!(variable = name, "session toggle not set; using default");
                Ok(None)
            }
            None => Err(SessionConfigError::MissingEnv { name }),
        }
    }

    /// Reject an unparsable value in release builds, fall back in debug.
    fn invalid<T>(
        &self,
        name: &'static str,
        value: String,
        expected: &'static str,
        default: T,
    ) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(variable = name, value = %value, "invalid session toggle; using default");
            Ok(default)
        } else {
            Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            })
        }
    }

    fn toggle(&self, name: &'static str, default: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.lookup(name)? else {
            return Ok(default);
        };
        match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => self.invalid(name, value, BOOL_EXPECTED, default),
        }
    }

    fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let default = if self.mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        };
        let Some(value) = self.lookup(SAMESITE_ENV)? else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" if self.mode.is_debug() => {
                warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
                Ok(SameSite::None)
            }
            "none" => Err(SessionConfigError::InsecureSameSiteNone),
            _ => self.invalid(SAMESITE_ENV, value, SAMESITE_EXPECTED, default),
        }
    }

    /// The TTL is optional in every build mode.
    fn ttl(&self) -> Result<Duration, SessionConfigError> {
        let Some(value) = self.env.string(TTL_ENV) else {
            return Ok(SESSION_TTL_DEFAULT);
        };
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => self.invalid(TTL_ENV, value, TTL_EXPECTED, SESSION_TTL_DEFAULT),
        }
    }

    fn key(&self, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
        let path = PathBuf::from(
            self.env
                .string(KEY_FILE_ENV)
                .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
        );

        let mut bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if self.mode.is_debug() || allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key; sessions will not survive a restart"
                );
                return Ok(Key::generate());
            }
            Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
        };

        let length = bytes.len();
        if length < SESSION_KEY_MIN_LEN {
            bytes.zeroize();
            if self.mode.is_debug() {
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short; using temporary session key"
                );
                return Ok(Key::generate());
            }
            return Err(SessionConfigError::KeyTooShort {
                path,
                length,
                min_len: SESSION_KEY_MIN_LEN,
            });
        }
        let key = Key::derive_from(&bytes);
        bytes.zeroize();
        Ok(key)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
