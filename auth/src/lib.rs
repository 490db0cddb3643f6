//! Authentication utilities library
//!
//! Provides the authentication building blocks of the tiendita service:
//! - Password hashing (Argon2id, tunable work factor)
//! - Token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(8, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not-a-hash"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Identity, TokenIssuer, TokenRejection, TokenValidator};
//! use chrono::{Duration, Utc};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::hours(1));
//! let validator = TokenValidator::new(secret);
//!
//! let now = Utc::now();
//! let identity = Identity::new("user123", "ana@mail.com", vec!["USER".to_string()]);
//! let token = issuer.issue(&identity, now).unwrap();
//!
//! assert_eq!(validator.validate(&token, now).unwrap(), identity);
//! assert_eq!(
//!     validator.validate(&token, now + Duration::hours(1)),
//!     Err(TokenRejection::Expired)
//! );
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity, PasswordHasher};
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//!     PasswordHasher::with_params(8, 1, 1).unwrap(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then generate token
//! auth.verify_credentials("password123", Some(&hash)).unwrap();
//! let identity = Identity::new("user123", "ana@mail.com", vec!["USER".to_string()]);
//! let token = auth.issue_token(&identity, Utc::now()).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&token, Utc::now()).unwrap();
//! assert_eq!(decoded.email, "ana@mail.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenRejection;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
