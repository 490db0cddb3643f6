use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("Token signature does not verify")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,
}
