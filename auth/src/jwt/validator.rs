use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Identity;
use super::errors::TokenRejection;

/// Verifies tokens produced by [`TokenIssuer`](super::TokenIssuer).
pub struct TokenValidator {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &[u8]) -> Self {
        let algorithm = Algorithm::HS256;

        // Expiry is checked against the caller's clock, without leeway.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        }
    }

    /// Validate a token at instant `now`.
    ///
    /// The signature is checked over the raw `header.payload` bytes before
    /// either segment is decoded.
    ///
    /// # Errors
    /// * `Malformed` - Not a compact JWT, or the signed content does not decode to claims
    /// * `BadSignature` - Signature does not match the content
    /// * `Expired` - `now` is at or past the token's `exp`
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenRejection> {
        let (message, signature) = token.rsplit_once('.').ok_or(TokenRejection::Malformed)?;

        let verified = crypto::verify(
            signature,
            message.as_bytes(),
            &self.decoding_key,
            self.algorithm,
        )
        .map_err(|_| TokenRejection::BadSignature)?;

        if !verified {
            return Err(TokenRejection::BadSignature);
        }

        let header = decode_header(token).map_err(|_| TokenRejection::Malformed)?;
        if header.alg != self.algorithm {
            return Err(TokenRejection::Malformed);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Signed token failed to decode");
                TokenRejection::Malformed
            })?
            .claims;

        if claims.is_expired(now) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims.into_identity())
    }
}
