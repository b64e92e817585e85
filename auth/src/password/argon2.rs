use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Default work factor, applied as the Argon2 iteration count.
pub const DEFAULT_WORK_FACTOR: u32 = 14;

/// Password hashing implementation.
///
/// Argon2id with a random salt per hash. The work factor is the number of
/// passes over memory, so raising it scales hashing time linearly.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the given work factor.
    ///
    /// # Arguments
    /// * `work_factor` - Argon2 iteration count (must be at least 1)
    ///
    /// # Errors
    /// * `InvalidParameters` - Work factor is outside Argon2's accepted range
    pub fn new(work_factor: u32) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            work_factor,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self { params })
    }

    /// Work factor this hasher was configured with.
    pub fn work_factor(&self) -> u32 {
        self.params.t_cost()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 could not produce a hash (e.g. memory exhaustion)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Parameters are read from the stored hash, so hashes produced under an
    /// older work factor still verify. Digest comparison is constant time.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `MalformedHash` - Stored hash is not a valid PHC string
    pub fn verify(&self, hash: &str, password: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordError::Mismatch,
                other => PasswordError::MalformedHash(other.to_string()),
            })
    }
}
