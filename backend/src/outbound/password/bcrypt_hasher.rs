//! bcrypt-backed `PasswordHasher`.
//!
//! bcrypt is deliberately slow, so both hashing and verification run on the
//! blocking pool instead of an executor thread.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Lowest work factor bcrypt accepts.
pub const BCRYPT_MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const BCRYPT_MAX_COST: u32 = 31;

/// Hashes passwords with bcrypt at a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher using `cost` rounds (log2).
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Backend`] when `cost` is outside
    /// [`BCRYPT_MIN_COST`]..=[`BCRYPT_MAX_COST`].
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
            return Err(PasswordHashError::backend(format!(
                "bcrypt cost must be between {BCRYPT_MIN_COST} and {BCRYPT_MAX_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PasswordHashError::backend(err.to_string()))?
        .map_err(|err| PasswordHashError::backend(err.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = run_blocking(move || bcrypt::hash(password.as_str(), cost)).await?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_ref().to_owned();
        run_blocking(move || bcrypt::verify(password.as_str(), &encoded)).await
    }
}
