
use argon2::password_hash::{PasswordHashString, SaltString};
use argon2::{Algorithm, Argon2, PasswordHash, PasswordHasher, Version};
use thiserror::Error;
use crate::rng::random_bytes;

const SALT_SIZE: usize = 16;

/// Blocking and CPU-heavy: async callers run it on the blocking pool.
pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError>;
    fn check_hash(
        &self,
        hash: PasswordHash<'_>,
        password: &str,
    ) -> Result<bool, HasherError>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductionHasherConfig {
    pub argon2_params: argon2::Params,
}

impl ProductionHasherConfig {
    pub fn new(argon2_params: argon2::Params) -> Self {
        ProductionHasherConfig {
            argon2_params,
        }
    }
}

pub struct ProductionHasher {
    argon2_params: argon2::Params,
}

impl ProductionHasher {
    pub fn new(config: ProductionHasherConfig) -> Self {
        ProductionHasher {
            argon2_params: config.argon2_params,
        }
    }

    fn get_hasher(&self) -> Argon2<'_> {
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.argon2_params.clone(),
        )
    }

    fn make_salt(&self) -> Result<SaltString, HasherError> {
        Ok(SaltString::encode_b64(&random_bytes(&mut rand::rng(), SALT_SIZE))?)
    }
}

impl Hasher for ProductionHasher {
    fn generate_hash(&self, password: &str) -> Result<PasswordHashString, HasherError> {
        let salt = self.make_salt()?;
        let hasher = self.get_hasher();
        Ok(
            hasher.hash_password(password.as_bytes(), &salt)?
                .serialize()
        )
    }

    /// Verification compares the digests in constant time and takes the
    /// salt and argon2 parameters from `hash` itself.
    fn check_hash(&self, hash: PasswordHash<'_>, password: &str) -> Result<bool, HasherError> {
        hash
            .verify_password(&[&self.get_hasher()], password)
            .map(|_| true)
            .or_else(|e|
                if let argon2::password_hash::Error::Password = e {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            )
    }
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] argon2::password_hash::Error),
}
