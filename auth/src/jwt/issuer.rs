use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::claims::Identity;
use super::errors::JwtError;

/// Signs time-bound tokens for authenticated identities.
///
/// Uses HS256 (HMAC with SHA-256). Every token is valid from the issue
/// instant for a fixed time-to-live.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing secret shared with the validator
    /// * `ttl` - Validity window of every issued token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a signed token for `identity`, valid from `now` until `now + ttl`.
    ///
    /// # Returns
    /// Compact JWT (`header.payload.signature`)
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::for_identity(identity, now, self.ttl);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}
