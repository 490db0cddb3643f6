use std::sync::Arc;

use auth::Authenticator;
use auth::Identity;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity taken from a validated token, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl TryFrom<Identity> for AuthenticatedUser {
    type Error = String;

    fn try_from(identity: Identity) -> Result<Self, Self::Error> {
        let user_id = UserId::from_string(&identity.subject).map_err(|e| e.to_string())?;
        let roles = identity
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            user_id,
            email: identity.email,
            roles,
        })
    }
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let identity = authenticator
        .validate_token(token, Utc::now())
        .map_err(|rejection| {
            tracing::warn!(reason = %rejection, "Bearer token rejected");
            unauthorized()
        })?;

    let user = AuthenticatedUser::try_from(identity).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token carries an unusable identity");
        unauthorized()
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Invalid or expired token".to_string())
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}
