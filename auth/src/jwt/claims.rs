use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Authenticated principal carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier (token `sub`)
    pub subject: String,
    pub email: String,
    /// Role labels, e.g. `USER`, `ADMIN`
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(subject: impl ToString, email: impl ToString, roles: Vec<String>) -> Self {
        Self {
            subject: subject.to_string(),
            email: email.to_string(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Token payload.
///
/// Standard RFC 7519 `sub`, `iat` and `exp` plus the identity's email and
/// roles. Every field is required on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    pub email: String,

    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for an identity, valid from `now` for `ttl`.
    pub fn for_identity(identity: &Identity, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: identity.subject.clone(),
            email: identity.email.clone(),
            roles: identity.roles.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn into_identity(self) -> Identity {
        Identity {
            subject: self.sub,
            email: self.email,
            roles: self.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn identity() -> Identity {
        Identity::new(
            "user123",
            "juan@mail.com",
            vec!["USER".to_string(), "ADMIN".to_string()],
        )
    }

    #[test]
    fn test_for_identity() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = Claims::for_identity(&identity(), now, Duration::hours(24));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "juan@mail.com");
        assert_eq!(claims.roles, vec!["USER", "ADMIN"]);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let now = Utc.timestamp_opt(1000, 0).unwrap();
        let claims = Claims::for_identity(&identity(), now, Duration::seconds(60));

        assert!(!claims.is_expired(Utc.timestamp_opt(1000, 0).unwrap()));
        assert!(!claims.is_expired(Utc.timestamp_opt(1059, 0).unwrap()));
        assert!(claims.is_expired(Utc.timestamp_opt(1060, 0).unwrap()));
        assert!(claims.is_expired(Utc.timestamp_opt(5000, 0).unwrap()));
    }

    #[test]
    fn test_into_identity_round_trips() {
        let now = Utc.timestamp_opt(1000, 0).unwrap();
        let identity = identity();

        let claims = Claims::for_identity(&identity, now, Duration::seconds(60));
        assert_eq!(claims.into_identity(), identity);
    }

    #[test]
    fn test_has_role() {
        let identity = identity();
        assert!(identity.has_role("ADMIN"));
        assert!(!identity.has_role("admin"));
    }
}
