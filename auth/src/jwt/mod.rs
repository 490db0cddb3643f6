pub mod claims;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::Claims;
pub use claims::Identity;
pub use errors::JwtError;
pub use errors::TokenRejection;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
