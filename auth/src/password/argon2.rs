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

/// Password hashing implementation.
///
/// Argon2id with a random salt per digest. The work factor (memory, passes,
/// lanes) is fixed at construction and applies to every new digest.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Digest of a random secret, hashed with this hasher's work factor
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with an explicit work factor.
    ///
    /// The digest used by [`verify_dummy`](Self::verify_dummy) is computed
    /// here, so construction costs one full hash.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB (at least `8 * parallelism`)
    /// * `iterations` - Number of passes (at least 1)
    /// * `parallelism` - Degree of parallelism (at least 1)
    ///
    /// # Errors
    /// * `InvalidParameters` - Argon2 rejected the parameter combination
    /// * `HashingFailed` - The dummy digest could not be computed
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_secret = SaltString::generate(&mut OsRng);
        let dummy_hash = hash_with(&argon2, dummy_secret.as_str())?;

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a mismatch and for a digest that cannot be parsed.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification against a digest no password can match.
    ///
    /// Costs the same as [`verify`](Self::verify) on a real account, so a
    /// login for an unknown email takes as long as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> bool {
        self.verify(password, &self.dummy_hash);
        false
    }
}

fn hash_with(argon2: &Argon2<'static>, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}
