use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenRejection;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Provides high-level authentication operations by coordinating
/// password hashing, token issuance and token validation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Unknown account")]
    UnknownAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Validity window of issued tokens
    /// * `password_hasher` - Hasher carrying the password work factor
    pub fn new(jwt_secret: &[u8], token_ttl: Duration, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(jwt_secret, token_ttl),
            token_validator: TokenValidator::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against the stored hash of an account, if there is one.
    ///
    /// Without an account the password is checked against a dummy digest so
    /// both failure paths cost one full verification.
    ///
    /// # Errors
    /// * `UnknownAccount` - `stored_hash` is `None`
    /// * `InvalidCredentials` - Password does not match
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        match stored_hash {
            Some(hash) if self.password_hasher.verify(password, hash) => Ok(()),
            Some(_) => Err(AuthenticationError::InvalidCredentials),
            None => {
                self.password_hasher.verify_dummy(password);
                Err(AuthenticationError::UnknownAccount)
            }
        }
    }

    /// Generate a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.token_issuer.issue(identity, now)
    }

    /// Validate a token and extract its identity.
    ///
    /// # Errors
    /// * `TokenRejection` - Bad signature, expired or malformed token
    pub fn validate_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Identity, TokenRejection> {
        self.token_validator.validate(token, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::hours(24),
            PasswordHasher::with_params(8, 1, 1).unwrap(),
        )
    }

    fn identity() -> Identity {
        Identity::new("user123", "juan@mail.com", vec!["USER".to_string()])
    }

    #[test]
    fn test_verify_credentials_then_issue_token() {
        let authenticator = authenticator();
        let now = Utc::now();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        authenticator
            .verify_credentials(password, Some(&hash))
            .expect("Credentials rejected");

        let token = authenticator
            .issue_token(&identity(), now)
            .expect("Failed to issue token");
        let decoded = authenticator
            .validate_token(&token, now)
            .expect("Token validation failed");
        assert_eq!(decoded, identity());
    }

    #[test]
    fn test_verify_credentials_wrong_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_credentials("wrong_password", Some(&hash));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_credentials_unknown_account() {
        let authenticator = authenticator();

        let result = authenticator.verify_credentials("my_password", None);
        assert!(matches!(result, Err(AuthenticationError::UnknownAccount)));
    }

    #[test]
    fn test_verify_credentials_corrupt_hash_is_invalid_credentials() {
        let authenticator = authenticator();

        let result = authenticator.verify_credentials("my_password", Some("not-a-phc-string"));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_expired_token() {
        let authenticator = authenticator();
        let now = Utc::now();

        let token = authenticator
            .issue_token(&identity(), now)
            .expect("Failed to issue token");

        let result = authenticator.validate_token(&token, now + Duration::hours(25));
        assert_eq!(result, Err(TokenRejection::Expired));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here", Utc::now());
        assert!(result.is_err());
    }
}
